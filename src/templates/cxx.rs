//! templates::cxx
//!
//! C++ sources of a generated package.
//!
//! Package `Pkg_0002` using `Pkg_0001` produces class `CPkg_0002` holding
//! a `CPkg_0001 m_Pkg_0001` member, whose `f()` traces its own call and
//! then calls `f()` on every member in Uses order.

use super::{finish, PackageContext};

/// Public header `<name>/Lib<name>.h`.
pub fn header(ctx: &PackageContext<'_>) -> String {
    let name = ctx.name();
    let mut lines = vec![
        "/* -*- c++ -*- */".to_string(),
        format!("#ifndef LIB_{}_H", name),
        format!("#define LIB_{}_H 1", name),
        String::new(),
    ];

    for dep in ctx.use_names() {
        lines.push(format!("#include \"{0}/Lib{0}.h\"", dep));
    }
    if !ctx.uses.is_empty() {
        lines.push(String::new());
    }

    lines.extend(
        [
            "#ifdef _MSC_VER",
            "# define API_EXPORT __declspec( dllexport )",
            "#else",
            "#if __GNUC__ >= 4",
            "# define API_EXPORT __attribute__((visibility(\"default\")))",
            "#else",
            "# define API_EXPORT",
            "#endif",
            "#endif",
            "",
        ]
        .map(String::from),
    );

    lines.push(format!("class API_EXPORT C{}", name));
    lines.push("{".into());
    lines.push("public:".into());
    lines.push(format!("   C{}();", name));
    lines.push(format!("   ~C{}();", name));
    lines.push("   void f();".into());
    lines.push("private:".into());
    for dep in ctx.use_names() {
        lines.push(format!("   C{0} m_{0};", dep));
    }
    lines.push("};".into());
    lines.push(format!("#endif /* !LIB_{}_H */", name));
    lines.push("/* EOF */".into());

    finish(lines)
}

/// Library source `src/Lib<name>.cxx`.
pub fn source(ctx: &PackageContext<'_>) -> String {
    let name = ctx.name();
    let mut lines = vec![
        format!("// Lib{}.cxx", name),
        "#include <iostream>".to_string(),
        format!("#include \"{0}/Lib{0}.h\"", name),
        String::new(),
        format!("C{0}::C{0}()", name),
        "{".into(),
        format!("   std::cout << \":: c-tor C{}\\n\";", name),
        "}".into(),
        String::new(),
        format!("C{0}::~C{0}()", name),
        "{".into(),
        format!("   std::cout << \":: d-tor C{}\\n\";", name),
        "}".into(),
        String::new(),
        "void".into(),
        format!("C{}::f()", name),
        "{".into(),
        format!("   std::cout << \":: C{}.f\\n\";", name),
    ];

    for dep in ctx.use_names() {
        lines.push(format!("   m_{}.f();", dep));
    }
    lines.push("}".into());

    finish(lines)
}

/// Test program `src/test<name>.cxx`.
pub fn test_program(ctx: &PackageContext<'_>) -> String {
    let name = ctx.name();
    finish(vec![
        format!("// test{}.cxx", name),
        "#include <iostream>".into(),
        format!("#include \"{0}/Lib{0}.h\"", name),
        String::new(),
        "int main()".into(),
        "{".into(),
        format!("  C{} o;", name),
        "  o.f();".into(),
        "  return 0;".into(),
        "}".into(),
        "// EOF".into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Prefix;
    use crate::templates::fixtures::package;

    const LEAF_HEADER: &str = r#"/* -*- c++ -*- */
#ifndef LIB_Pkg_0001_H
#define LIB_Pkg_0001_H 1

#ifdef _MSC_VER
# define API_EXPORT __declspec( dllexport )
#else
#if __GNUC__ >= 4
# define API_EXPORT __attribute__((visibility("default")))
#else
# define API_EXPORT
#endif
#endif

class API_EXPORT CPkg_0001
{
public:
   CPkg_0001();
   ~CPkg_0001();
   void f();
private:
};
#endif /* !LIB_Pkg_0001_H */
/* EOF */
"#;

    #[test]
    fn header_without_uses() {
        let pkg = package(1, Prefix::None);
        assert_eq!(header(&PackageContext::new(&pkg, &[])), LEAF_HEADER);
    }

    #[test]
    fn header_includes_and_fields_in_uses_order() {
        let pkg = package(3, Prefix::None);
        let uses = [package(2, Prefix::Nested), package(1, Prefix::None)];
        let text = header(&PackageContext::new(&pkg, &uses));

        let includes: Vec<_> = text.lines().filter(|l| l.starts_with("#include")).collect();
        assert_eq!(
            includes,
            [
                "#include \"Pkg_0002/LibPkg_0002.h\"",
                "#include \"Pkg_0001/LibPkg_0001.h\"",
            ]
        );

        let fields: Vec<_> = text.lines().filter(|l| l.contains(" m_")).collect();
        assert_eq!(fields, ["   CPkg_0002 m_Pkg_0002;", "   CPkg_0001 m_Pkg_0001;"]);
        assert!(text.contains("class API_EXPORT CPkg_0003\n"));
    }

    #[test]
    fn source_calls_every_used_member() {
        let pkg = package(2, Prefix::None);
        let uses = [package(1, Prefix::None)];
        let expected = r#"// LibPkg_0002.cxx
#include <iostream>
#include "Pkg_0002/LibPkg_0002.h"

CPkg_0002::CPkg_0002()
{
   std::cout << ":: c-tor CPkg_0002\n";
}

CPkg_0002::~CPkg_0002()
{
   std::cout << ":: d-tor CPkg_0002\n";
}

void
CPkg_0002::f()
{
   std::cout << ":: CPkg_0002.f\n";
   m_Pkg_0001.f();
}
"#;
        assert_eq!(source(&PackageContext::new(&pkg, &uses)), expected);
    }

    #[test]
    fn test_program_instantiates_class() {
        let pkg = package(4, Prefix::Nested);
        let expected = r#"// testPkg_0004.cxx
#include <iostream>
#include "Pkg_0004/LibPkg_0004.h"

int main()
{
  CPkg_0004 o;
  o.f();
  return 0;
}
// EOF
"#;
        assert_eq!(test_program(&PackageContext::new(&pkg, &[])), expected);
    }
}

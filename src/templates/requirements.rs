//! templates::requirements
//!
//! CMT `requirements` manifest of a generated package.

use super::{finish, PackageContext};

const RULE: &str = "#---------------------------------";

/// Manifest `cmt/requirements`.
///
/// Lists each used package once as a `use` prerequisite, aggregates the
/// used libraries into the link options of the library and the test
/// program, then declares both constituents.
pub fn manifest(ctx: &PackageContext<'_>) -> String {
    let name = ctx.name();
    let mut lines = vec![
        RULE.to_string(),
        format!("package {}", name),
        String::new(),
        "# package deps".into(),
    ];

    for dep in ctx.uses {
        let prefix = dep.prefix.as_str();
        if prefix.is_empty() {
            lines.push(format!("use {0} {0}*", dep.name));
        } else {
            lines.push(format!("use {0} {0}* {1}", dep.name, prefix));
        }
    }
    lines.push(String::new());

    let used_libs: Vec<String> = ctx.use_names().map(|n| format!("Lib{}", n)).collect();
    let mut test_libs = vec![format!("Lib{}", name)];
    test_libs.extend(used_libs.iter().cloned());

    lines.push("# constituents".into());
    lines.push(format!("macro Lib{}_linkopts \"{}\"", name, used_libs.join(" ")));
    lines.push(format!("macro test{}_linkopts \"{}\"", name, test_libs.join(" ")));
    lines.push(format!("library Lib{0} Lib{0}.cxx", name));
    lines.push(String::new());
    lines.push(format!("program test{0} test{0}.cxx", name));
    lines.push(RULE.into());
    lines.push("## EOF ##".into());

    finish(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Prefix;
    use crate::templates::fixtures::package;

    #[test]
    fn manifest_without_uses() {
        let pkg = package(1, Prefix::None);
        let expected = r#"#---------------------------------
package Pkg_0001

# package deps

# constituents
macro LibPkg_0001_linkopts ""
macro testPkg_0001_linkopts "LibPkg_0001"
library LibPkg_0001 LibPkg_0001.cxx

program testPkg_0001 testPkg_0001.cxx
#---------------------------------
## EOF ##
"#;
        assert_eq!(manifest(&PackageContext::new(&pkg, &[])), expected);
    }

    #[test]
    fn manifest_lists_each_use_once_with_prefix() {
        let pkg = package(3, Prefix::None);
        let uses = [package(1, Prefix::Nested), package(2, Prefix::None)];
        let text = manifest(&PackageContext::new(&pkg, &uses));

        let use_lines: Vec<_> = text.lines().filter(|l| l.starts_with("use ")).collect();
        assert_eq!(
            use_lines,
            ["use Pkg_0001 Pkg_0001* Pre/Fix", "use Pkg_0002 Pkg_0002*"]
        );
        assert!(text.contains("macro LibPkg_0003_linkopts \"LibPkg_0001 LibPkg_0002\"\n"));
        assert!(text.contains(
            "macro testPkg_0003_linkopts \"LibPkg_0003 LibPkg_0001 LibPkg_0002\"\n"
        ));
    }
}

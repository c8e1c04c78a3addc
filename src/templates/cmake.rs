//! templates::cmake
//!
//! CMake descriptors driven through the CMT CMake macros
//! (`$CMTROOT/cmake/CMTLib.cmake`).

use super::{finish, PackageContext, ProjectContext, RootContext};

const INCLUDE_CMT: &str = "include($ENV{CMTROOT}/cmake/CMTLib.cmake)";
const MINIMUM_VERSION: &str = "cmake_minimum_required(VERSION 2.8)";
const RULE: &str = "#-----------------";

/// Top-level `CMakeLists.txt`.
///
/// Declares the synthetic root project `work`, which uses every generated
/// project, then triggers the CMT action step.
pub fn root(ctx: &RootContext<'_>) -> String {
    let root = ctx.root.to_string_lossy().replace('\\', "/");
    let mut lines: Vec<String> = [
        "## CMakeLists.txt",
        MINIMUM_VERSION,
        INCLUDE_CMT,
        "",
        "set(CMTROOT \"$ENV{CMTROOT}\")",
        "set(CMTPROJECTPATH \"$ENV{CMTPROJECTPATH}\")",
        "if(\"${CMTPROJECTPATH}\" STREQUAL \"\")",
    ]
    .map(String::from)
    .to_vec();

    lines.push(format!("  set(CMTPROJECTPATH \"{}\")", root));
    lines.extend(
        [
            "endif()",
            "",
            "unset(status)",
            "cmt_init(status)",
            "",
            "if(\"${status}\" STREQUAL \"stop\")",
            " return()",
            "endif()",
            "",
            "cmt_off()",
            "",
            "cmt_use_project(work)",
            "",
            "cmt_project(work \"\")",
            "",
        ]
        .map(String::from),
    );

    for project in ctx.projects {
        lines.push(format!("cmt_use_project({})", project));
    }
    if !ctx.projects.is_empty() {
        lines.push(String::new());
    }

    lines.push("cmt_action()".into());
    lines.push(String::new());
    lines.push("## EOF ##".into());

    finish(lines)
}

/// Project-level `CMakeLists.txt`.
pub fn project(ctx: &ProjectContext<'_>) -> String {
    let mut lines = vec![
        format!("## {}", ctx.name),
        MINIMUM_VERSION.to_string(),
        INCLUDE_CMT.to_string(),
        RULE.to_string(),
        format!("cmt_project({} \"\")", ctx.name),
        String::new(),
    ];

    for used in ctx.uses {
        lines.push(format!("cmt_use_project({})", used));
    }
    if !ctx.uses.is_empty() {
        lines.push(String::new());
    }

    for package in ctx.packages {
        lines.push(format!("cmt_has_package({})", package.full_name()));
    }
    lines.push(String::new());
    lines.push("## EOF ##".into());

    finish(lines)
}

/// Package-level `CMakeLists.txt`.
///
/// Each used package appears once as `cmt_use_package`, and its library
/// is linked into this package's library.
pub fn package(ctx: &PackageContext<'_>) -> String {
    let name = ctx.name();
    let mut lines = vec![
        format!("## {}", name),
        MINIMUM_VERSION.to_string(),
        INCLUDE_CMT.to_string(),
        RULE.to_string(),
        format!("cmt_package({})", name),
        String::new(),
    ];

    for dep in ctx.use_names() {
        lines.push(format!("cmt_use_package({})", dep));
    }
    if !ctx.uses.is_empty() {
        lines.push(String::new());
    }

    let link: Vec<String> = ctx.use_names().map(|n| format!("Lib{}", n)).collect();
    lines.push(format!(
        "cmt_library(Lib{0} src/Lib{0}.cxx \"{1}\")",
        name,
        link.join(";")
    ));
    lines.push(format!("cmt_executable(test{0} src/test{0}.cxx Lib{0})", name));
    lines.push(format!("cmt_test(mytest{})", name));
    lines.push(String::new());
    lines.push(RULE.into());
    lines.push(String::new());
    lines.push("cmt_action()".into());
    lines.push(String::new());
    lines.push("## EOF ##".into());

    finish(lines)
}

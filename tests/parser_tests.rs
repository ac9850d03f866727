// tests/parser_tests.rs

use cmake_class_creator::ast::{
    AddExecutable, AddLibrary, CMakeStringList, ListItem, ListItemString, SetNormalVariable,
    Statement, StatementKind, TargetSources, VariableUse,
};
use cmake_class_creator::syntax::{parse, scan};

// A helper to get the single statement of a parsed source.
fn parse_one(source: &str) -> Statement {
    let mut statements = parse(source).unwrap();
    assert_eq!(statements.len(), 1, "expected one statement in {source:?}");
    statements.remove(0)
}

fn string(text: &str) -> ListItem {
    ListItemString::new(text).into()
}

fn variable(name: &str) -> ListItem {
    VariableUse::new(name).into()
}

fn list(items: Vec<ListItem>) -> CMakeStringList {
    CMakeStringList::new(items)
}

// ---
// Statement shapes
// ---

#[test]
fn test_parse_set_normal_variable() {
    let expected = SetNormalVariable::new("TabsPls_Source", list(vec![string("main.cpp")]));
    assert_eq!(parse_one("set(TabsPls_Source main.cpp)"), expected.into());
}

#[test]
fn test_parse_set_normal_variable_using_other_variable() {
    let expected = SetNormalVariable::new("TabsPls_Source", list(vec![variable("other_var")]));
    assert_eq!(parse_one("set(TabsPls_Source ${other_var})"), expected.clone().into());
    assert_eq!(parse_one("set(TabsPls_Source \"${other_var}\")"), expected.into());
}

#[test]
fn test_parse_quoted_list_item_containing_variable_use() {
    let text = "\"anything can be put here, and it will be only one item, even with a ${variable}\"";
    let expected = SetNormalVariable::new("TabsPls_Source", list(vec![string(text)]));
    assert_eq!(parse_one(&format!("set(TabsPls_Source {text})")), expected.into());
}

#[test]
fn test_parse_quoted_list_item_containing_multiple_items() {
    let source = concat!(
        "set(TabsPls_Source ",
        "\"anything can be put here, and it will be only one item, even with a ${variable}\"\n",
        "main.cpp\n",
        "${other_var}\n",
        "\"${another_var_in_quotes}\"\n",
        "#a comment that will be ignored\n",
        "\"a complete line with only text\"\n",
        ")"
    );
    let expected = SetNormalVariable::new(
        "TabsPls_Source",
        list(vec![
            string("\"anything can be put here, and it will be only one item, even with a ${variable}\""),
            string("main.cpp"),
            variable("other_var"),
            variable("another_var_in_quotes"),
            string("\"a complete line with only text\""),
        ]),
    );
    assert_eq!(parse_one(source), expected.into());
}

#[test]
fn test_parse_set_skips_comments_and_quoted_tokens() {
    let source = concat!(
        "set(var\n${some_other_var}\n",
        "cool_class.h\n",
        "# The parser should skip these commented tokens: PARENT_SCOPE, ) \n",
        "\" and tokens between double quotes are not actual tokens: PARENT_SCOPE, )\" \n",
        "\"${using_variables_should_work_between_quotes_though}\" \n",
        "cool_class.cpp\n)"
    );
    let expected = SetNormalVariable::new(
        "var",
        list(vec![
            variable("some_other_var"),
            string("cool_class.h"),
            string("\" and tokens between double quotes are not actual tokens: PARENT_SCOPE, )\""),
            variable("using_variables_should_work_between_quotes_though"),
            string("cool_class.cpp"),
        ]),
    );
    assert_eq!(parse_one(source), expected.into());
}

#[test]
fn test_parse_set_with_parent_scope() {
    let expected = SetNormalVariable::new("var", list(vec![string("content")]));
    assert_eq!(parse_one("set(var content PARENT_SCOPE)"), expected.into());
}

#[test]
fn test_parse_add_library_variants() {
    let expected: Statement =
        AddLibrary::new("TabsPlsLib", list(vec![string("file.h"), string("file.cpp")])).into();
    assert_eq!(parse_one("add_library(TabsPlsLib file.h file.cpp)"), expected);
    assert_eq!(parse_one("add_library(TabsPlsLib STATIC file.h file.cpp)"), expected);
    assert_eq!(
        parse_one("add_library(TabsPlsLib STATIC EXCLUDE_FROM_ALL file.h file.cpp)"),
        expected
    );
    assert_eq!(parse_one("add_library(TabsPlsLib OBJECT file.h file.cpp)"), expected);
}

#[test]
fn test_parse_add_executable_flags() {
    let expected: Statement = AddExecutable::new(
        "TabsPls",
        list(vec![
            variable("TabsPls_Headers"),
            variable("TabsPls_Sources"),
            string("main.cpp"),
        ]),
    )
    .into();
    for flags in ["", "WIN32 ", "MACOSX_BUNDLE ", "MACOSX_BUNDLE EXCLUDE_FROM_ALL "] {
        let source =
            format!("add_executable(TabsPls {flags}${{TabsPls_Headers}} ${{TabsPls_Sources}} main.cpp)");
        assert_eq!(parse_one(&source), expected, "flags {flags:?}");
    }
}

#[test]
fn test_parse_target_sources() {
    let expected = TargetSources::new(
        "TabsPls",
        list(vec![
            string("file_linux.h"),
            string("file_linux.cpp"),
            variable("TabsPls_Sources_Linux"),
            string("linux_extras.h"),
        ]),
    );
    assert_eq!(
        parse_one("target_sources(TabsPls PRIVATE file_linux.h file_linux.cpp ${TabsPls_Sources_Linux} PUBLIC linux_extras.h)"),
        expected.into()
    );
}

#[test]
fn test_scope_keywords_never_become_items() {
    let statement = parse_one(concat!(
        "target_sources(TabsPls PRIVATE a.cpp b.cpp c.cpp PUBLIC pub_a.cpp pub_b.cpp pub_c.cpp\n",
        "INTERFACE interface.hpp)"
    ));
    let texts: Vec<String> = statement.list().iter().map(|item| item.to_string()).collect();
    assert_eq!(
        texts,
        [
            "a.cpp",
            "b.cpp",
            "c.cpp",
            "pub_a.cpp",
            "pub_b.cpp",
            "pub_c.cpp",
            "interface.hpp"
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        parse_one("ADD_EXECUTABLE(App main.cpp)").kind(),
        StatementKind::AddExecutable
    );
    assert_eq!(parse_one("Set(S a.cpp)").kind(), StatementKind::SetNormalVariable);
}

#[test]
fn test_target_name_may_use_variables() {
    let statement = parse_one("add_executable(${PROJECT_NAME} main.cpp)");
    assert_eq!(statement.name(), "${PROJECT_NAME}");
}

#[test]
fn test_variable_glued_to_text_stays_one_item() {
    let statement = parse_one("set(S ${x}abc \"a ${x}\" ${y})");
    assert_eq!(
        statement.list(),
        &list(vec![string("${x}abc"), string("\"a ${x}\""), variable("y")])
    );
}

#[test]
fn test_parse_rejects_unsupported_statement() {
    assert!(parse("project(TabsPls)").is_err());
    assert!(parse("target_sources(TabsPls interface.hpp)").is_err());
}

#[test]
fn test_unbalanced_statement_does_not_hide_the_next_one() {
    let ast = scan("add_library(x t\nset(y a.cpp)");
    assert_eq!(ast.len(), 1);
    assert_eq!(
        ast[0],
        SetNormalVariable::new("y", list(vec![string("a.cpp")])).into()
    );
    assert!(parse("add_library(x t\nset(y a.cpp)").is_err());
}

#[test]
fn test_unterminated_quote_is_not_an_item() {
    assert!(scan("set(x \"abc)").is_empty());
    assert!(parse("set(x \"abc)").is_err());
}

#[test]
fn test_imported_and_alias_targets_are_not_source_lists() {
    assert!(scan("add_library(Ext SHARED IMPORTED)").is_empty());
    assert!(scan("add_library(Alias ALIAS Real)").is_empty());
    assert!(scan("add_executable(Tool IMPORTED)").is_empty());
}

// ---
// Locations
// ---

#[test]
fn test_item_locations_are_byte_offsets() {
    let statement = parse_one("set(S\ta.cpp\t${v} \"${w}\")");
    let items = &statement.list().items;
    assert_eq!(items[0].start_location(), 6);
    assert_eq!(items[0].end_location(), 11);
    assert_eq!(items[1].start_location(), 12);
    assert_eq!(items[1].end_location(), 16);
    assert_eq!(items[2].start_location(), 17);
    assert_eq!(items[2].end_location(), 23);
}

#[test]
fn test_scanned_locations_are_absolute() {
    let source = "project(P)\nset(S a.cpp)\n";
    let ast = scan(source);
    assert_eq!(ast.len(), 1);
    let item = &ast[0].list().items[0];
    assert_eq!(&source[item.start_location()..item.end_location()], "a.cpp");
    assert_eq!(ast[0].span().start, 11);
    assert_eq!(ast[0].span().end, 23);
}

// ---
// Scanning
// ---

#[test]
fn test_scan_counts_only_supported_statements() {
    let source = concat!(
        "cmake_minimum_required(VERSION 3.10)\n",
        "project(TabsPls)\n",
        "# add_library(Commented a.cpp)\n",
        "set(Sources a.cpp)\n",
        "message(STATUS \"set(Fake b.cpp)\")\n",
        "add_executable(App ${Sources})\n",
        "target_link_libraries(App PRIVATE Qt5::Core)\n",
        "target_sources(App PRIVATE extra.cpp)\n",
    );
    let kinds: Vec<StatementKind> = scan(source).iter().map(Statement::kind).collect();
    assert_eq!(
        kinds,
        [
            StatementKind::SetNormalVariable,
            StatementKind::AddExecutable,
            StatementKind::TargetSources
        ]
    );
}

#[test]
fn test_scan_skips_env_set() {
    let ast = scan("set(ENV{PATH} /usr/bin)\nset(x a.cpp)");
    assert_eq!(ast.len(), 1);
    assert_eq!(ast[0].name(), "x");
}

#[test]
fn test_render_and_parse_again() {
    let nodes: Vec<Statement> = vec![
        SetNormalVariable::new("S", list(vec![string("a.cpp"), variable("Other")])).into(),
        AddLibrary::new("Lib", list(vec![string("\"with space.cpp\""), string("b.cpp")])).into(),
        AddExecutable::new("App", list(vec![variable("S"), string("main.cpp")])).into(),
        TargetSources::new("App", list(vec![string("win.cpp"), variable("Extra")])).into(),
    ];
    for node in nodes {
        assert_eq!(parse_one(&node.to_string()), node);
    }
}

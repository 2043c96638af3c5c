use dm_parser::{NodeArena, NodeData, NodeIndex, TreeError, parse_program};

fn names_of_consts(arena: &NodeArena, container: NodeIndex) -> Vec<String> {
    arena
        .statements(container)
        .expect("statement list")
        .iter()
        .map(|&stmt| match arena.data(stmt) {
            Some(NodeData::VariableDeclaration { declarations, .. }) => {
                match arena.data(declarations[0]) {
                    Some(NodeData::VariableDeclarator { name, .. }) => name.clone(),
                    _ => String::from("?"),
                }
            }
            Some(other) => other.kind_name().to_string(),
            None => String::from("?"),
        })
        .collect()
}

#[test]
fn test_replace_with_multiple_splices_in_order() {
    let (mut arena, program) =
        parse_program("import { A, B } from 'flags';\nfoo();").expect("parse");
    let import = arena.statements(program).expect("body")[0];

    let one = arena.add_boolean_literal(true);
    let a = arena.add_const_declaration("A", one);
    let two = arena.add_boolean_literal(false);
    let b = arena.add_const_declaration("B", two);
    arena.replace_with_multiple(import, vec![a, b]).expect("replace");

    assert_eq!(names_of_consts(&arena, program), vec!["A", "B", "ExpressionStatement"]);
    assert_eq!(arena.parent(a), program);
    assert_eq!(arena.parent(b), program);
    assert!(arena.parent(import).is_none());
}

#[test]
fn test_remove_statement_detaches_node() {
    let (mut arena, program) = parse_program("a();\nb();").expect("parse");
    let first = arena.statements(program).expect("body")[0];
    arena.remove_statement(first).expect("remove");
    assert_eq!(arena.statements(program).map(<[NodeIndex]>::len), Some(1));
    assert!(arena.parent(first).is_none());

    // A detached statement can no longer be located.
    assert!(matches!(
        arena.remove_statement(first),
        Err(TreeError::NotInStatementList { kind: "ExpressionStatement", .. })
    ));
}

#[test]
fn test_unshift_statement_in_block() {
    let (mut arena, program) = parse_program("function f() { g(); }").expect("parse");
    let func = arena.statements(program).expect("body")[0];
    let Some(NodeData::FunctionDeclaration { body, .. }) = arena.data(func) else {
        panic!("expected function");
    };
    let body = *body;
    let value = arena.add_boolean_literal(true);
    let decl = arena.add_const_declaration("_DEBUG", value);
    arena.unshift_statement(body, decl).expect("unshift");
    assert_eq!(names_of_consts(&arena, body), vec!["_DEBUG", "ExpressionStatement"]);
    assert_eq!(arena.parent(decl), body);

    assert_eq!(
        arena.unshift_statement(func, decl),
        Err(TreeError::NotAStatementContainer(func))
    );
}

#[test]
fn test_replace_statement_expression() {
    let (mut arena, program) = parse_program("assert(x);").expect("parse");
    let stmt = arena.statements(program).expect("body")[0];
    let old = arena.statement_expression(stmt).expect("expression");

    let debug = arena.add_identifier("DEBUG");
    let and = arena.add_binary(debug, "&&", old);
    let wrapped = arena.add_parenthesized(and);
    arena
        .replace_statement_expression(stmt, wrapped)
        .expect("replace expression");

    assert_eq!(arena.statement_expression(stmt), Some(wrapped));
    assert_eq!(arena.parent(wrapped), stmt);
    // The reused call keeps its new parent.
    assert_eq!(arena.parent(old), and);

    assert_eq!(
        arena.replace_statement_expression(program, wrapped),
        Err(TreeError::NotAnExpressionStatement(program))
    );
}

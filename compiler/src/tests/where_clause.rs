use quell_model::{JoinQuery, Value};

use super::support::{comments, mysql, posts, users};
use crate::CompileError;

#[test]
fn where_clause_combines_disjunctions_and_joined_conditions() {
    let users = users()
        .or(vec![
            users().gt("id", 100).build(),
            users().eq("name", "ada").build(),
        ])
        .build();
    let posts = posts().like("title", "%rust%").build();
    let comments = comments().eq("authorId", 7).build();
    let jq = JoinQuery::new(users.clone())
        .join(&posts, &users, "authorId")
        .join(&comments, &posts, "postId");
    let data = mysql().compile(&jq, None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT users.*\
         \nFROM\n\tusers\n\tJOIN posts ON posts.author_id = users.id\n\tJOIN comments ON comments.post_id = posts.id\
         \nWHERE\n\t((users.id > :arg0) OR (users.name = :arg1))\n\tAND posts.title LIKE :arg2\n\tAND comments.author_id = :arg3"
    );
    assert_eq!(
        data.params.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["arg0", "arg1", "arg2", "arg3"]
    );
    assert_eq!(data.params.get("arg0"), Some(&Value::Integer(100)));
    assert_eq!(data.params.get("arg3"), Some(&Value::Integer(7)));
}

#[test]
fn guaranteed_empty_branches_are_pruned_from_a_disjunction() {
    let q = users()
        .or(vec![
            users().is_in("id", Vec::<i64>::new()).build(),
            users().eq("name", "ada").build(),
        ])
        .build();
    let data = mysql().compile(&q.into(), None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT users.*\nFROM\n\tusers\nWHERE\n\t(users.name = :arg0)"
    );
}

#[test]
fn a_disjunction_with_every_branch_pruned_is_rejected() {
    let q = users()
        .or(vec![
            users().is_in("id", Vec::<i64>::new()).build(),
            users().is_in("name", Vec::<String>::new()).build(),
        ])
        .build();
    let err = mysql().compile(&q.into(), None, &[]).unwrap_err();
    assert_eq!(err, CompileError::VacuousDisjunction);
}

#[test]
fn a_live_branch_without_conditions_matches_everything() {
    let q = users()
        .or(vec![users().build(), users().eq("name", "ada").build()])
        .build();
    let data = mysql().compile(&q.into(), None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT users.*\nFROM\n\tusers\nWHERE\n\t((1 = 1) OR (users.name = :arg0))"
    );
}

#[test]
fn a_guaranteed_empty_primary_query_is_not_compiled() {
    let q = users().is_in("id", Vec::<i64>::new()).build();
    let err = mysql()
        .compile(&q.clone().into(), None, &[])
        .unwrap_err();
    assert_eq!(err, CompileError::GuaranteedEmptyQuery);
    let err = mysql().compile_count(&q.into()).unwrap_err();
    assert_eq!(err, CompileError::GuaranteedEmptyQuery);
}

#[test]
fn nested_disjunction_branches_share_the_parameter_counter() {
    let q = users()
        .eq("createdBy", 1)
        .or(vec![
            users().between("id", 10, 20).build(),
            users().is_in("id", [30, 40]).build(),
        ])
        .build();
    let data = mysql().compile(&q.into(), None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT users.*\nFROM\n\tusers\nWHERE\n\tusers.created_by = :arg0 AND ((users.id BETWEEN :arg1 AND :arg2) OR (users.id IN (:arg3, :arg4)))"
    );
}

#[test]
fn compiling_the_same_query_twice_is_deterministic() {
    let users = users().eq("name", "ada").build();
    let posts = posts().like("title", "%rust%").build();
    let jq = JoinQuery::new(users.clone()).join(&posts, &users, "authorId");
    let builder = mysql();
    let a = builder.compile(&jq, None, &[]).unwrap();
    let b = builder.compile(&jq, None, &[]).unwrap();
    assert_eq!(a, b);
}

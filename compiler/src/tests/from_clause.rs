use quell_model::{JoinQuery, Value};

use super::support::{comments, mysql, posts, users};
use crate::CompileError;

#[test]
fn single_table_from_clause() {
    let users = users().build();
    let data = mysql().compile(&users.into(), None, &[]).unwrap();
    assert_eq!(data.sql, "SELECT users.*\nFROM\n\tusers");
    assert!(data.params.is_empty());
}

#[test]
fn backward_join_with_explicit_aliases() {
    let users = users().alias("uuu").build();
    let posts = posts().alias("ppp").build();
    let jq = JoinQuery::new(users.clone()).join(&posts, &users, "authorId");
    let data = mysql().compile(&jq, None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT uuu.*\nFROM\n\tusers AS uuu\n\tJOIN posts AS ppp ON ppp.author_id = uuu.id"
    );
}

#[test]
fn two_level_backward_join() {
    let users = users().build();
    let posts = posts().build();
    let comments = comments().build();
    let jq = JoinQuery::new(users.clone())
        .join(&posts, &users, "authorId")
        .join(&comments, &posts, "postId");
    let data = mysql().compile(&jq, None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT users.*\nFROM\n\tusers\n\tJOIN posts ON posts.author_id = users.id\n\tJOIN comments ON comments.post_id = posts.id"
    );
}

#[test]
fn forward_join_introduces_the_referred_side() {
    let posts = posts().build();
    let users = users().build();
    let jq = JoinQuery::new(posts.clone()).join(&posts, &users, "authorId");
    let data = mysql().compile(&jq, None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT posts.*\nFROM\n\tposts\n\tJOIN users ON posts.author_id = users.id"
    );
}

#[test]
fn left_join_keeps_branch_conditions_in_the_on_clause() {
    let users = users().build();
    let posts = posts()
        .conditions_in_join()
        .like("title", "%rust%")
        .build();
    let jq = JoinQuery::new(users.clone()).left_join(&posts, &users, "authorId");
    let data = mysql().compile(&jq, None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT users.*\nFROM\n\tusers\n\tLEFT JOIN posts ON posts.author_id = users.id AND posts.title LIKE :arg0"
    );
    assert_eq!(
        data.params.get("arg0"),
        Some(&Value::Text("%rust%".to_owned()))
    );
}

#[test]
fn join_with_both_sides_already_introduced_is_rejected() {
    let users = users().build();
    let posts = posts().build();
    let jq = JoinQuery::new(users.clone())
        .join(&posts, &users, "authorId")
        .join(&posts, &users, "authorId");
    let err = mysql().compile(&jq, None, &[]).unwrap_err();
    assert!(matches!(err, CompileError::MalformedJoinGraph { .. }));
}

#[test]
fn join_with_neither_side_introduced_is_rejected() {
    let users = users().build();
    let posts = posts().build();
    let comments = comments().build();
    let jq = JoinQuery::new(users).join(&comments, &posts, "postId");
    let err = mysql().compile(&jq, None, &[]).unwrap_err();
    assert!(matches!(err, CompileError::MalformedJoinGraph { .. }));
}

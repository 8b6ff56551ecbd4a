use quell_model::{JoinQuery, OrderBy, Pager};

use super::support::{comments, mysql, posts, postgres, users};

#[test]
fn dedup_wraps_a_backward_join_in_a_ranked_subquery() {
    let users = users().build();
    let posts = posts().like("title", "%rust%").build();
    let jq = JoinQuery::new(users.clone())
        .join(&posts, &users, "authorId")
        .dedup();
    let data = postgres().compile(&jq, None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT * FROM (SELECT users.*, ROW_NUMBER() OVER (PARTITION BY users.id ORDER BY posts.id) AS row_num\
         \nFROM\n\tusers\n\tJOIN posts ON posts.author_id = users.id\
         \nWHERE\n\tposts.title LIKE :arg0) AS dedup\
         \nWHERE dedup.row_num = 1"
    );
}

#[test]
fn dedup_ranks_over_every_backward_join() {
    let users = users().build();
    let posts = posts().build();
    let comments = comments().build();
    let jq = JoinQuery::new(users.clone())
        .join(&posts, &users, "authorId")
        .join(&comments, &posts, "postId")
        .dedup();
    let data = postgres().compile(&jq, None, &[]).unwrap();
    assert!(data.sql.contains(
        "ROW_NUMBER() OVER (PARTITION BY users.id ORDER BY posts.id, comments.id) AS row_num"
    ));
}

#[test]
fn dedup_without_backward_joins_compiles_plainly() {
    let posts = posts().build();
    let users = users().build();
    let jq = JoinQuery::new(posts.clone())
        .join(&posts, &users, "authorId")
        .dedup();
    let data = postgres().compile(&jq, None, &[]).unwrap();
    assert_eq!(
        data.sql,
        "SELECT posts.*\nFROM\n\tposts\n\tJOIN users ON posts.author_id = users.id"
    );
}

#[test]
fn dedup_keeps_ordering_inside_the_wrapper() {
    let users = users().build();
    let posts = posts().build();
    let jq = JoinQuery::new(users.clone())
        .join(&posts, &users, "authorId")
        .dedup();
    let order = [OrderBy::asc(&users, "name")];
    let data = mysql().compile(&jq, None, &order).unwrap();
    assert_eq!(
        data.sql,
        "SELECT * FROM (SELECT users.*, ROW_NUMBER() OVER (PARTITION BY users.id ORDER BY posts.id) AS row_num\
         \nFROM\n\tusers\n\tJOIN posts ON posts.author_id = users.id\
         \nORDER BY users.name ASC) AS dedup\
         \nWHERE dedup.row_num = 1"
    );
}

#[test]
fn paged_dedup_puts_the_limit_outside_the_wrapper() {
    let users = users().build();
    let posts = posts().build();
    let jq = JoinQuery::new(users.clone())
        .join(&posts, &users, "authorId")
        .dedup();
    let data = mysql()
        .compile(&jq, Some(&Pager::new(0, 25)), &[])
        .unwrap();
    assert_eq!(
        data.sql,
        "SELECT SQL_CALC_FOUND_ROWS * FROM (SELECT users.*, ROW_NUMBER() OVER (PARTITION BY users.id ORDER BY posts.id) AS row_num\
         \nFROM\n\tusers\n\tJOIN posts ON posts.author_id = users.id) AS dedup\
         \nWHERE dedup.row_num = 1\
         \nLIMIT :offset,:max"
    );
}

#[test]
fn dedup_count_collapses_to_distinct_primary_keys() {
    let users = users().build();
    let posts = posts().build();
    let jq = JoinQuery::new(users.clone())
        .join(&posts, &users, "authorId")
        .dedup();
    let data = postgres().compile_count(&jq).unwrap();
    assert_eq!(
        data.sql,
        "SELECT COUNT(DISTINCT users.id)\nFROM\n\tusers\n\tJOIN posts ON posts.author_id = users.id"
    );
}

use quell_model::{Query, QueryBuilder, Record};

use crate::{MySql, Postgres, SqlBuilder};

pub struct User;
pub struct Post;
pub struct Comment;

impl Record for User {
    fn table_name() -> &'static str {
        "users"
    }

    fn fields() -> Vec<&'static str> {
        vec!["id", "name", "createdBy"]
    }
}

impl Record for Post {
    fn table_name() -> &'static str {
        "posts"
    }

    fn fields() -> Vec<&'static str> {
        vec!["id", "title", "authorId"]
    }
}

impl Record for Comment {
    fn table_name() -> &'static str {
        "comments"
    }

    fn fields() -> Vec<&'static str> {
        vec!["id", "authorId", "postId"]
    }
}

pub fn users() -> QueryBuilder {
    Query::of::<User>()
}

pub fn posts() -> QueryBuilder {
    Query::of::<Post>()
}

pub fn comments() -> QueryBuilder {
    Query::of::<Comment>()
}

pub fn mysql() -> SqlBuilder {
    SqlBuilder::new(MySql())
}

pub fn postgres() -> SqlBuilder {
    SqlBuilder::new(Postgres())
}

//! Sample entities the explain tool can resolve calls for.

use cassandra_query::Entity;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
}

impl Entity for Person {
    const TABLE: &'static str = "person";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub owner: String,
    pub balance: f64,
}

impl Entity for Account {
    const TABLE: &'static str = "account";
}

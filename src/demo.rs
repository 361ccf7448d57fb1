//! Demo data for local runs
//!
//! Populates a store with a handful of users and lists so the voting
//! endpoints can be exercised without the catalogue services. The data is
//! illustrative only.

use crate::error::Result;
use crate::storage::RankingStore;
use crate::types::{
    ListStatus, ListType, MediaType, NewListItem, NewRankingList, NewUser, RankingList, User,
};
use serde_json::json;
use tracing::info;

/// What [`seed_demo_data`] created
#[derive(Debug, Clone)]
pub struct DemoSeed {
    pub users: Vec<User>,
    pub lists: Vec<RankingList>,
}

const DEMO_USERS: &[(&str, &str)] = &[
    ("Alice Johnson", "alice@example.com"),
    ("Bob Smith", "bob@example.com"),
    ("Charlie Brown", "charlie@example.com"),
];

const DEMO_MOVIES: &[(&str, &str, u32)] = &[
    ("278", "The Shawshank Redemption", 1994),
    ("238", "The Godfather", 1972),
    ("680", "Pulp Fiction", 1994),
    ("155", "The Dark Knight", 2008),
];

const DEMO_BOOKS: &[(&str, &str, &str)] = &[
    ("9780743273565", "The Great Gatsby", "F. Scott Fitzgerald"),
    ("9780451524935", "1984", "George Orwell"),
    ("9780061120084", "To Kill a Mockingbird", "Harper Lee"),
];

/// Insert the demo users, a group movie list and a personal book list
pub fn seed_demo_data(store: &dyn RankingStore) -> Result<DemoSeed> {
    let users = DEMO_USERS
        .iter()
        .map(|(name, email)| {
            store.create_user(NewUser {
                name: name.to_string(),
                email: email.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let owner = users[0].id;

    let movies = store.create_list(NewRankingList {
        name: "Movie Night Picks".to_string(),
        list_type: ListType::Group,
        media_type: MediaType::Movie,
        status: ListStatus::Voting,
        group_id: Some(1),
        created_by_user_id: owner,
    })?;
    for (external_id, title, year) in DEMO_MOVIES {
        store.add_item(
            movies.id,
            NewListItem {
                external_id: external_id.to_string(),
                title: title.to_string(),
                metadata: Some(json!({ "year": year })),
            },
        )?;
    }

    let books = store.create_list(NewRankingList {
        name: "Book Club Favorites".to_string(),
        list_type: ListType::Personal,
        media_type: MediaType::Book,
        status: ListStatus::Open,
        group_id: None,
        created_by_user_id: owner,
    })?;
    for (isbn, title, author) in DEMO_BOOKS {
        store.add_item(
            books.id,
            NewListItem {
                external_id: isbn.to_string(),
                title: title.to_string(),
                metadata: Some(json!({ "author": author })),
            },
        )?;
    }

    info!(
        "Seeded demo data: {} users, lists {} and {}",
        users.len(),
        movies.id,
        books.id
    );

    Ok(DemoSeed {
        users,
        lists: vec![movies, books],
    })
}

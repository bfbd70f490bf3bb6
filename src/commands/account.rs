//! Account command handlers: fees, favorites, reservations.

use anyhow::Result;
use library_client::{LibraryApi, PageRequest};
use serde_json::json;
use tracing::info;

use super::print_json;
use crate::cli::{FavoritesCommand, FeesCommand, PageArgs, ReservationsCommand};

fn page_request(page: &PageArgs) -> PageRequest {
    PageRequest::new(page.page, page.size)
}

pub async fn run_fees_command(api: &LibraryApi, command: &FeesCommand) -> Result<()> {
    let fees = api.fees();
    match command {
        FeesCommand::List(page) => print_json(&fees.user_fees(&page_request(page)).await?),
        FeesCommand::Pay { fee_id } => {
            let response = fees.pay(*fee_id).await?;
            info!(fee_id, "Payment recorded");
            print_json(&response)
        }
        FeesCommand::Calculate { borrow_id } => print_json(&fees.calculate(*borrow_id).await?),
    }
}

pub async fn run_favorites_command(api: &LibraryApi, command: &FavoritesCommand) -> Result<()> {
    let favorites = api.favorites();
    match command {
        FavoritesCommand::List(page) => {
            print_json(&favorites.user_favorites(&page_request(page)).await?)
        }
        FavoritesCommand::Add { book_id } => print_json(&favorites.add(*book_id).await?),
        FavoritesCommand::Remove { book_id } => {
            print_json(&favorites.remove_by_book(*book_id).await?)
        }
        FavoritesCommand::Check { book_id } => {
            let is_favorite = favorites.is_favorite(*book_id).await;
            print_json(&json!({ "bookId": book_id, "isFavorite": is_favorite }))
        }
    }
}

pub async fn run_reservations_command(
    api: &LibraryApi,
    command: &ReservationsCommand,
) -> Result<()> {
    let reservations = api.reservations();
    match command {
        ReservationsCommand::List(page) => {
            print_json(&reservations.user_reservations(&page_request(page)).await?)
        }
        ReservationsCommand::Create { book_id } => {
            print_json(&reservations.create(*book_id).await?)
        }
        ReservationsCommand::Cancel { reservation_id } => {
            print_json(&reservations.cancel(*reservation_id).await?)
        }
    }
}

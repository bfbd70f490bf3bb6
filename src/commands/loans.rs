//! Loan command handlers: borrow, return, renew, and listings.

use anyhow::{Result, bail};
use library_client::{ClientError, LibraryApi};
use tracing::{info, warn};

use super::print_json;
use crate::cli::{BorrowTarget, PageArgs};

pub async fn run_borrow_command(api: &LibraryApi, target: &BorrowTarget) -> Result<()> {
    let Some(user) = api.session().identity() else {
        return Err(ClientError::NotAuthenticated.into());
    };
    let borrow = api.borrow();
    let response = match (target.copy, target.book) {
        (Some(copy_id), _) => borrow.borrow(user.id, copy_id).await?,
        (None, Some(book_id)) => borrow.borrow_by_book(user.id, book_id).await?,
        (None, None) => bail!("Specify --copy <ID> or --book <ID>"),
    };
    info!(
        borrow_id = response.borrow_id,
        due = response.return_time.as_deref().unwrap_or("unknown"),
        "Borrowed"
    );
    print_json(&response)
}

pub async fn run_return_command(api: &LibraryApi, borrow_id: i64) -> Result<()> {
    let outcome = api.borrow().return_book(borrow_id).await?;
    info!(borrow_id, title = %outcome.borrow.book_title, "Returned");
    print_json(&outcome)
}

pub async fn run_renew_command(api: &LibraryApi, borrow_id: i64) -> Result<()> {
    let outcome = api.borrow().renew_book(borrow_id).await?;
    match outcome.due_date() {
        Some(due) => info!(borrow_id, due, "Renewed"),
        None => warn!(borrow_id, "Renewed, but the new due date could not be re-read"),
    }
    print_json(&outcome)
}

pub async fn run_loans_command(api: &LibraryApi, page: &PageArgs) -> Result<()> {
    print_json(&api.borrow().user_borrows(page.page, page.size).await?)
}

pub async fn run_history_command(api: &LibraryApi, page: &PageArgs) -> Result<()> {
    print_json(&api.borrow().history_page(page.page, page.size).await?)
}

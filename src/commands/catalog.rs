use anyhow::Result;
use library_client::LibraryApi;
use library_client::models::BookSearchParams;

use super::print_json;
use crate::cli::BooksCommand;

pub async fn run_books_command(api: &LibraryApi, command: &BooksCommand) -> Result<()> {
    let books = api.books();
    match command {
        BooksCommand::Search {
            keyword,
            author,
            category,
            language,
            available,
            page,
        } => {
            let params = BookSearchParams {
                keyword: keyword.clone(),
                author: author.clone(),
                category: category.clone(),
                language: language.clone(),
                available: available.then_some(true),
                page: Some(page.page),
                size: Some(page.size),
                sort: None,
            };
            print_json(&books.search(&params).await?)
        }
        BooksCommand::Show { book_id } => print_json(&books.get(*book_id).await?),
        BooksCommand::Copies { book_id } => print_json(&books.copies(*book_id).await?),
    }
}

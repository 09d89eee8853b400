//! Book exchange repository.

use serde::{Deserialize, Serialize};

use campus_core::entities::Book;
use campus_core::enums::{BookStatus, Table};
use campus_core::errors::CoreError;
use campus_core::ids::PREFIX_BOOK;
use campus_core::page::Page;
use campus_core::realtime::ChangeKind;
use campus_core::validate;
use campus_core::views::BookListing;

use crate::error::DatabaseError;
use crate::helpers::{
    fmt_datetime, now, parse_datetime, parse_enum, parse_string_list, seller_at, to_json_list,
};
use crate::service::CampusService;
use crate::updates::BookUpdate;

/// Fields of the book listing form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub condition: String,
    #[serde(default)]
    pub images: Vec<String>,
}

const SELECT_COLS: &str = "id, user_id, title, author, description, price, condition, images, \
     status, created_at, updated_at";
const BOOK_COLS: &str = "b.id, b.user_id, b.title, b.author, b.description, b.price, \
     b.condition, b.images, b.status, b.created_at, b.updated_at";

fn row_to_book(row: &libsql::Row) -> Result<Book, DatabaseError> {
    Ok(Book {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        author: row.get(3)?,
        description: row.get(4)?,
        price: row.get(5)?,
        condition: row.get(6)?,
        images: parse_string_list(&row.get::<String>(7)?)?,
        status: parse_enum(&row.get::<String>(8)?)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

fn row_to_listing(row: &libsql::Row) -> Result<BookListing, DatabaseError> {
    Ok(BookListing {
        book: row_to_book(row)?,
        seller: seller_at(row, 11)?,
    })
}

impl CampusService {
    /// List a book for sale. The new row is owned by `user_id` and starts `available`.
    pub async fn create_book_listing(
        &self,
        user_id: &str,
        new: &NewBook,
    ) -> Result<Book, DatabaseError> {
        let title = validate::require("title", &new.title)?;
        let author = validate::require("author", &new.author)?;
        let condition = validate::require("condition", &new.condition)?;
        let price = validate::price(new.price)?;

        let _guard = self.write_guard().await;
        let id = self.db().generate_id(PREFIX_BOOK).await?;
        let now = now();

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO books ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                libsql::params![
                    id.as_str(),
                    user_id,
                    title,
                    author,
                    new.description.trim(),
                    price,
                    condition,
                    to_json_list(&new.images)?,
                    BookStatus::Available.as_str(),
                    fmt_datetime(now),
                    fmt_datetime(now)
                ],
            )
            .await?;

        let book = Book {
            id,
            user_id: user_id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            description: new.description.trim().to_string(),
            price,
            condition: condition.to_string(),
            images: new.images.clone(),
            status: BookStatus::Available,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(book_id = %book.id, user_id, "book listed");
        self.publish(Table::Books, ChangeKind::Insert, &book.id, &book)?;
        Ok(book)
    }

    pub async fn get_book(&self, id: &str) -> Result<Book, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM books WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("book", id))?;
        row_to_book(&row)
    }

    /// A single listing with its seller's contact.
    pub async fn get_book_listing(&self, id: &str) -> Result<BookListing, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {BOOK_COLS}, s.id, s.full_name, s.avatar_url, s.phone
                     FROM books b LEFT JOIN profiles s ON s.id = b.user_id
                     WHERE b.id = ?1"
                ),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("book", id))?;
        row_to_listing(&row)
    }

    /// Listings with the given status (`available` when `None`), newest first.
    pub async fn list_books(
        &self,
        status: Option<BookStatus>,
        page: Page,
    ) -> Result<Vec<BookListing>, DatabaseError> {
        let status = status.unwrap_or(BookStatus::Available);
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {BOOK_COLS}, s.id, s.full_name, s.avatar_url, s.phone
                     FROM books b LEFT JOIN profiles s ON s.id = b.user_id
                     WHERE b.status = ?1
                     ORDER BY b.created_at DESC, b.rowid DESC
                     LIMIT ?2 OFFSET ?3"
                ),
                libsql::params![
                    status.as_str(),
                    i64::from(page.limit),
                    i64::from(page.offset)
                ],
            )
            .await?;

        let mut listings = Vec::new();
        while let Some(row) = rows.next().await? {
            listings.push(row_to_listing(&row)?);
        }
        Ok(listings)
    }

    /// Owner-only partial update. Status changes must follow the book state machine.
    pub async fn update_book(
        &self,
        user_id: &str,
        book_id: &str,
        update: BookUpdate,
    ) -> Result<Book, DatabaseError> {
        let _guard = self.write_guard().await;
        let current = self.get_book(book_id).await?;
        if current.user_id != user_id {
            return Err(CoreError::Forbidden(format!("book {book_id} belongs to another user")).into());
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        for (column, value) in [
            ("title", &update.title),
            ("author", &update.author),
            ("condition", &update.condition),
        ] {
            if let Some(value) = value {
                let value = validate::require(column, value)?;
                sets.push(format!("{column} = ?{idx}"));
                params.push(value.into());
                idx += 1;
            }
        }
        if let Some(ref description) = update.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.trim().into());
            idx += 1;
        }
        if let Some(price) = update.price {
            sets.push(format!("price = ?{idx}"));
            params.push(validate::price(price)?.into());
            idx += 1;
        }
        if let Some(ref images) = update.images {
            sets.push(format!("images = ?{idx}"));
            params.push(to_json_list(images)?.into());
            idx += 1;
        }
        if let Some(status) = update.status {
            if status != current.status {
                if !current.status.can_transition_to(status) {
                    return Err(CoreError::InvalidTransition {
                        entity_type: "book".into(),
                        id: book_id.to_string(),
                        from: current.status.to_string(),
                        to: status.to_string(),
                    }
                    .into());
                }
                sets.push(format!("status = ?{idx}"));
                params.push(status.as_str().into());
                idx += 1;
            }
        }

        if sets.is_empty() {
            return Ok(current);
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(fmt_datetime(now()).into());
        idx += 1;

        params.push(book_id.into());
        let sql = format!("UPDATE books SET {} WHERE id = ?{idx}", sets.join(", "));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        let updated = self.get_book(book_id).await?;
        self.publish(Table::Books, ChangeKind::Update, &updated.id, &updated)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_support::helpers::{create_user, test_service};
    use crate::updates::BookUpdateBuilder;

    fn calculus() -> NewBook {
        NewBook {
            title: "Calculus".into(),
            author: "Spivak".into(),
            description: "Some highlighting".into(),
            price: 30.0,
            condition: "good".into(),
            images: vec!["http://x/books/a.jpg".into()],
        }
    }

    async fn count_books(svc: &CampusService) -> i64 {
        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM books", ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get(0).unwrap()
    }

    #[tokio::test]
    async fn complete_listing_yields_one_available_row_owned_by_submitter() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;

        let book = svc.create_book_listing(&ada, &calculus()).await.unwrap();

        assert_eq!(count_books(&svc).await, 1);
        let stored = svc.get_book(&book.id).await.unwrap();
        assert_eq!(stored.user_id, ada);
        assert_eq!(stored.status, BookStatus::Available);
        assert_eq!(stored, book);
    }

    #[rstest]
    #[case::missing_title(NewBook { title: " ".into(), ..calculus() })]
    #[case::missing_author(NewBook { author: String::new(), ..calculus() })]
    #[case::missing_condition(NewBook { condition: String::new(), ..calculus() })]
    #[case::negative_price(NewBook { price: -1.0, ..calculus() })]
    #[tokio::test]
    async fn incomplete_listing_inserts_nothing(#[case] new: NewBook) {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let err = svc.create_book_listing(&ada, &new).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Domain(CoreError::Validation(_))));
        assert_eq!(count_books(&svc).await, 0);
    }

    #[tokio::test]
    async fn list_defaults_to_available_with_seller_phone() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        svc.update_profile(
            &ada,
            crate::updates::ProfileUpdateBuilder::new().phone("555-0100").build(),
        )
        .await
        .unwrap();

        let sold = svc.create_book_listing(&ada, &calculus()).await.unwrap();
        svc.update_book(&ada, &sold.id, BookUpdateBuilder::new().status(BookStatus::Sold).build())
            .await
            .unwrap();
        let open = svc.create_book_listing(&ada, &calculus()).await.unwrap();

        let listings = svc.list_books(None, Page::default()).await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].book.id, open.id);
        assert_eq!(listings[0].seller.as_ref().unwrap().phone, "555-0100");

        let sold_list = svc
            .list_books(Some(BookStatus::Sold), Page::default())
            .await
            .unwrap();
        assert_eq!(sold_list.len(), 1);
        assert_eq!(sold_list[0].book.id, sold.id);
    }

    #[tokio::test]
    async fn only_owner_may_update() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let bob = create_user(&svc, "bob").await;
        let book = svc.create_book_listing(&ada, &calculus()).await.unwrap();

        let err = svc
            .update_book(&bob, &book.id, BookUpdateBuilder::new().price(1.0).build())
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Domain(CoreError::Forbidden(_))));
    }

    #[tokio::test]
    async fn status_follows_state_machine() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let book = svc.create_book_listing(&ada, &calculus()).await.unwrap();

        let reserved = svc
            .update_book(&ada, &book.id, BookUpdateBuilder::new().status(BookStatus::Reserved).build())
            .await
            .unwrap();
        assert_eq!(reserved.status, BookStatus::Reserved);

        let sold = svc
            .update_book(&ada, &book.id, BookUpdateBuilder::new().status(BookStatus::Sold).build())
            .await
            .unwrap();
        assert_eq!(sold.status, BookStatus::Sold);

        let err = svc
            .update_book(&ada, &book.id, BookUpdateBuilder::new().status(BookStatus::Available).build())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Domain(CoreError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn update_fields_and_listing_detail() {
        let svc = test_service().await;
        let ada = create_user(&svc, "ada").await;
        let book = svc.create_book_listing(&ada, &calculus()).await.unwrap();

        let updated = svc
            .update_book(
                &ada,
                &book.id,
                BookUpdateBuilder::new().price(12.5).title("Calculus 4th ed").build(),
            )
            .await
            .unwrap();
        assert!((updated.price - 12.5).abs() < f64::EPSILON);
        assert_eq!(updated.title, "Calculus 4th ed");

        let listing = svc.get_book_listing(&book.id).await.unwrap();
        assert_eq!(listing.book, updated);
        assert_eq!(listing.seller.unwrap().id, ada);
    }
}

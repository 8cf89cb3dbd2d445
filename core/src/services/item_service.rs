//! Item catalog service: listing, search and post-rental comments.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{Comment, Item, User};
use crate::domain::value_objects::{CommentDetails, ItemDetails};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{
    BookingRepository, CommentRepository, ItemRepository, RequestRepository, UserRepository,
};

/// Fields required to list a new item
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i64>,
}

/// Patch applied to an existing item; absent fields keep their value
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Service managing the item catalog
pub struct ItemService<I, U, B, C, Q>
where
    I: ItemRepository,
    U: UserRepository,
    B: BookingRepository,
    C: CommentRepository,
    Q: RequestRepository,
{
    item_repository: Arc<I>,
    user_repository: Arc<U>,
    booking_repository: Arc<B>,
    comment_repository: Arc<C>,
    request_repository: Arc<Q>,
}

impl<I, U, B, C, Q> ItemService<I, U, B, C, Q>
where
    I: ItemRepository,
    U: UserRepository,
    B: BookingRepository,
    C: CommentRepository,
    Q: RequestRepository,
{
    /// Create a new item service
    pub fn new(
        item_repository: Arc<I>,
        user_repository: Arc<U>,
        booking_repository: Arc<B>,
        comment_repository: Arc<C>,
        request_repository: Arc<Q>,
    ) -> Self {
        Self {
            item_repository,
            user_repository,
            booking_repository,
            comment_repository,
            request_repository,
        }
    }

    /// List a new item owned by `owner_id`
    pub async fn create(&self, owner_id: i64, new_item: NewItem) -> DomainResult<Item> {
        self.require_user(owner_id).await?;

        if let Some(request_id) = new_item.request_id {
            self.request_repository
                .find_by_id(request_id)
                .await?
                .ok_or(DomainError::not_found("Request", request_id))?;
        }

        let item = Item::new(
            owner_id,
            new_item.name,
            new_item.description,
            new_item.available,
            new_item.request_id,
        );
        let item = self.item_repository.create(item).await?;
        tracing::debug!(item_id = item.id, owner_id, "listed item");
        Ok(item)
    }

    /// Apply a partial update; only the recorded owner may do this
    pub async fn update(
        &self,
        user_id: i64,
        item_id: i64,
        patch: UpdateItem,
    ) -> DomainResult<Item> {
        let mut item = self.require_item(item_id).await?;

        if item.owner_id != user_id {
            return Err(DomainError::forbidden(format!(
                "Only the owner may update item {item_id}"
            )));
        }

        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(available) = patch.available {
            item.available = available;
        }

        self.item_repository.update(item).await
    }

    /// Fetch an item together with its comments
    pub async fn find_by_id(&self, item_id: i64) -> DomainResult<ItemDetails> {
        let item = self.require_item(item_id).await?;
        let comments = self.comment_repository.find_by_item(item_id).await?;
        let comments = self.with_author_names(comments).await?;
        Ok(ItemDetails { item, comments })
    }

    /// List the items owned by a user
    pub async fn find_by_owner(&self, owner_id: i64) -> DomainResult<Vec<Item>> {
        self.require_user(owner_id).await?;
        self.item_repository.find_by_owner(owner_id).await
    }

    /// Text search over available items. Blank text yields an empty result
    /// set, not "match all".
    pub async fn search(&self, text: &str) -> DomainResult<Vec<Item>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }
        self.item_repository.search(trimmed).await
    }

    /// Post a comment on an item. Allowed only when the author has a
    /// completed, approved booking of that item at `now`.
    pub async fn add_comment(
        &self,
        author_id: i64,
        item_id: i64,
        text: String,
        now: DateTime<Utc>,
    ) -> DomainResult<CommentDetails> {
        let author = self.require_user(author_id).await?;
        self.require_item(item_id).await?;

        let qualified = self
            .booking_repository
            .has_qualifying_booking(item_id, author_id, now)
            .await?;
        if !qualified {
            return Err(DomainError::validation(format!(
                "User {author_id} has no completed booking of item {item_id}; commenting not allowed"
            )));
        }

        let comment = self
            .comment_repository
            .create(Comment::new(item_id, author_id, text, now))
            .await?;
        Ok(CommentDetails::new(comment, author.name))
    }

    async fn require_user(&self, user_id: i64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::not_found("User", user_id))
    }

    async fn require_item(&self, item_id: i64) -> DomainResult<Item> {
        self.item_repository
            .find_by_id(item_id)
            .await?
            .ok_or(DomainError::not_found("Item", item_id))
    }

    /// Resolve author display names for a batch of comments, one lookup per
    /// distinct author.
    async fn with_author_names(
        &self,
        comments: Vec<Comment>,
    ) -> DomainResult<Vec<CommentDetails>> {
        let mut names: HashMap<i64, String> = HashMap::new();
        let mut details = Vec::with_capacity(comments.len());

        for comment in comments {
            if !names.contains_key(&comment.author_id) {
                let name = self
                    .user_repository
                    .find_by_id(comment.author_id)
                    .await?
                    .map(|u| u.name)
                    .unwrap_or_default();
                names.insert(comment.author_id, name);
            }
            let author_name = names[&comment.author_id].clone();
            details.push(CommentDetails::new(comment, author_name));
        }

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Booking;
    use crate::repositories::{
        BookingRepository, MockBookingRepository, MockCommentRepository, MockItemRepository,
        MockRequestRepository, MockUserRepository, UserRepository,
    };
    use chrono::Duration;

    type Service = ItemService<
        MockItemRepository,
        MockUserRepository,
        MockBookingRepository,
        MockCommentRepository,
        MockRequestRepository,
    >;

    struct Fixture {
        service: Service,
        users: Arc<MockUserRepository>,
        bookings: Arc<MockBookingRepository>,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(MockUserRepository::new());
        let items = Arc::new(MockItemRepository::new());
        let bookings = Arc::new(MockBookingRepository::new(Arc::clone(&items)));
        let comments = Arc::new(MockCommentRepository::new());
        let requests = Arc::new(MockRequestRepository::new());
        let service = ItemService::new(
            items,
            Arc::clone(&users),
            Arc::clone(&bookings),
            comments,
            requests,
        );
        Fixture {
            service,
            users,
            bookings,
        }
    }

    async fn add_user(users: &MockUserRepository, name: &str, email: &str) -> User {
        users.create(User::new(name, email)).await.unwrap()
    }

    fn new_item(name: &str, description: &str, available: bool) -> NewItem {
        NewItem {
            name: name.into(),
            description: description.into(),
            available,
            request_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_existing_owner() {
        let f = fixture();
        let error = f
            .service
            .create(7, new_item("Drill", "Power drill", true))
            .await
            .unwrap_err();
        assert_eq!(error, DomainError::not_found("User", 7));
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_forbidden() {
        let f = fixture();
        let owner = add_user(&f.users, "Owner", "o@x.com").await;
        let other = add_user(&f.users, "Other", "t@x.com").await;
        let item = f
            .service
            .create(owner.id, new_item("Drill", "Power drill", true))
            .await
            .unwrap();

        let error = f
            .service
            .update(
                other.id,
                item.id,
                UpdateItem {
                    name: Some("Stolen drill".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(error, DomainError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_search_blank_text_is_empty() {
        let f = fixture();
        let owner = add_user(&f.users, "Owner", "o@x.com").await;
        f.service
            .create(owner.id, new_item("Drill", "Power drill", true))
            .await
            .unwrap();

        assert!(f.service.search("").await.unwrap().is_empty());
        assert!(f.service.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_matches_name_and_description() {
        let f = fixture();
        let owner = add_user(&f.users, "Owner", "o@x.com").await;
        let drill = f
            .service
            .create(owner.id, new_item("Drill", "18V cordless", true))
            .await
            .unwrap();
        f.service
            .create(owner.id, new_item("Ladder", "3m aluminium", true))
            .await
            .unwrap();
        // unavailable items never match
        f.service
            .create(owner.id, new_item("Drill press", "Bench drill", false))
            .await
            .unwrap();

        let by_name = f.service.search("dRiLl").await.unwrap();
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, drill.id);

        let by_description = f.service.search("cordless").await.unwrap();
        assert_eq!(by_description.len(), 1);
        assert_eq!(by_description[0].id, drill.id);
    }

    #[tokio::test]
    async fn test_comment_requires_completed_approved_booking() {
        let f = fixture();
        let owner = add_user(&f.users, "Owner", "o@x.com").await;
        let renter = add_user(&f.users, "Renter", "r@x.com").await;
        let stranger = add_user(&f.users, "Stranger", "s@x.com").await;
        let item = f
            .service
            .create(owner.id, new_item("Drill", "Power drill", true))
            .await
            .unwrap();

        let now = Utc::now();
        let booking = Booking::new(
            item.id,
            renter.id,
            now - Duration::hours(3),
            now - Duration::hours(1),
        );
        let booking = f.bookings.create(booking).await.unwrap();
        f.bookings.approve(booking.id).await.unwrap();

        let comment = f
            .service
            .add_comment(renter.id, item.id, "Great drill".into(), now)
            .await
            .unwrap();
        assert_eq!(comment.author_name, "Renter");

        let error = f
            .service
            .add_comment(stranger.id, item.id, "Nice!".into(), now)
            .await
            .unwrap_err();
        assert!(matches!(error, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_comment_eligibility_is_monotonic_in_now() {
        let f = fixture();
        let owner = add_user(&f.users, "Owner", "o@x.com").await;
        let renter = add_user(&f.users, "Renter", "r@x.com").await;
        let item = f
            .service
            .create(owner.id, new_item("Drill", "Power drill", true))
            .await
            .unwrap();

        let now = Utc::now();
        let booking = Booking::new(
            item.id,
            renter.id,
            now - Duration::hours(2),
            now + Duration::hours(1),
        );
        let booking = f.bookings.create(booking).await.unwrap();
        f.bookings.approve(booking.id).await.unwrap();

        // still running: not eligible
        assert!(!f
            .bookings
            .has_qualifying_booking(item.id, renter.id, now)
            .await
            .unwrap());

        // once eligible, stays eligible at every later instant
        let first_true = now + Duration::hours(1) + Duration::seconds(1);
        assert!(f
            .bookings
            .has_qualifying_booking(item.id, renter.id, first_true)
            .await
            .unwrap());
        assert!(f
            .bookings
            .has_qualifying_booking(item.id, renter.id, first_true + Duration::days(30))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_find_by_id_joins_comment_authors() {
        let f = fixture();
        let owner = add_user(&f.users, "Owner", "o@x.com").await;
        let renter = add_user(&f.users, "Renter", "r@x.com").await;
        let item = f
            .service
            .create(owner.id, new_item("Drill", "Power drill", true))
            .await
            .unwrap();

        let now = Utc::now();
        let booking = Booking::new(
            item.id,
            renter.id,
            now - Duration::hours(3),
            now - Duration::hours(1),
        );
        let booking = f.bookings.create(booking).await.unwrap();
        f.bookings.approve(booking.id).await.unwrap();
        f.service
            .add_comment(renter.id, item.id, "Great drill".into(), now)
            .await
            .unwrap();

        let details = f.service.find_by_id(item.id).await.unwrap();
        assert_eq!(details.item.id, item.id);
        assert_eq!(details.comments.len(), 1);
        assert_eq!(details.comments[0].author_name, "Renter");
    }
}

// 🗄️ Storage Engine - In-memory catalog tables
//
// One ID-keyed table per entity kind. Each table sits behind its own RwLock,
// so id assignment + insert, and read-merge-write on update, happen under a
// single write guard: concurrent creates never share an id and concurrent
// updates to the same record never interleave field writes.
//
// Ids come from a per-table counter seeded at 1 and are never reused, even
// after a delete.

use crate::entities::{
    BlogPost, BlogPostPatch, ContactSubmission, NewBlogPost, NewContactSubmission, NewProperty,
    NewUser, Property, PropertyPatch, PropertyType, User,
};
use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Featured properties returned when no limit is given
pub const DEFAULT_FEATURED_PROPERTIES: usize = 6;

/// Featured blog posts returned when no limit is given
pub const DEFAULT_FEATURED_BLOG_POSTS: usize = 3;

// ============================================================================
// STORAGE CONTRACT
// ============================================================================

/// Typed CRUD and query operations over the four entity kinds.
///
/// Not-found is a value (`None` / `false`), never an error. Any backend must
/// make each call atomic with respect to the others.
pub trait Storage: Send + Sync {
    // ------------------------------------------------------------------------
    // Users (no delete: users are permanent)
    // ------------------------------------------------------------------------
    fn get_user(&self, id: u32) -> StoreResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    fn create_user(&self, user: NewUser) -> StoreResult<User>;

    // ------------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------------
    fn get_all_properties(&self) -> StoreResult<Vec<Property>>;
    fn get_property(&self, id: u32) -> StoreResult<Option<Property>>;
    fn query_properties(&self, predicate: &dyn Fn(&Property) -> bool) -> StoreResult<Vec<Property>>;
    fn get_featured_properties(&self, limit: Option<usize>) -> StoreResult<Vec<Property>>;
    fn create_property(&self, property: NewProperty) -> StoreResult<Property>;
    fn update_property(&self, id: u32, patch: PropertyPatch) -> StoreResult<Option<Property>>;
    fn delete_property(&self, id: u32) -> StoreResult<bool>;

    fn get_properties_by_type(&self, property_type: PropertyType) -> StoreResult<Vec<Property>> {
        self.query_properties(&|p: &Property| p.property_type == property_type)
    }

    // ------------------------------------------------------------------------
    // Blog posts
    // ------------------------------------------------------------------------
    fn get_all_blog_posts(&self) -> StoreResult<Vec<BlogPost>>;
    fn get_blog_post(&self, id: u32) -> StoreResult<Option<BlogPost>>;
    fn query_blog_posts(&self, predicate: &dyn Fn(&BlogPost) -> bool) -> StoreResult<Vec<BlogPost>>;
    fn get_featured_blog_posts(&self, limit: Option<usize>) -> StoreResult<Vec<BlogPost>>;
    fn create_blog_post(&self, post: NewBlogPost) -> StoreResult<BlogPost>;
    fn update_blog_post(&self, id: u32, patch: BlogPostPatch) -> StoreResult<Option<BlogPost>>;
    fn delete_blog_post(&self, id: u32) -> StoreResult<bool>;

    /// Exact, case-sensitive category match
    fn get_blog_posts_by_category(&self, category: &str) -> StoreResult<Vec<BlogPost>> {
        self.query_blog_posts(&|p: &BlogPost| p.category == category)
    }

    // ------------------------------------------------------------------------
    // Contact submissions (no update / delete)
    // ------------------------------------------------------------------------
    fn create_contact_submission(&self, submission: NewContactSubmission) -> StoreResult<ContactSubmission>;
    fn get_all_contact_submissions(&self) -> StoreResult<Vec<ContactSubmission>>;
    fn get_contact_submission(&self, id: u32) -> StoreResult<Option<ContactSubmission>>;
    fn mark_contact_submission_read(&self, id: u32) -> StoreResult<Option<ContactSubmission>>;

    fn counts(&self) -> StoreResult<RecordCounts>;
}

/// Live records per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordCounts {
    pub users: usize,
    pub properties: usize,
    pub blog_posts: usize,
    pub contact_submissions: usize,
}

// ============================================================================
// TABLE
// ============================================================================

trait Record: Clone {
    const TABLE: &'static str;

    fn id(&self) -> u32;
}

/// Records that can be promoted on the home page
trait Featured: Record {
    fn is_featured(&self) -> bool;

    /// Timestamp featured lists are ordered by (newest first)
    fn featured_at(&self) -> DateTime<Utc>;
}

impl Record for User {
    const TABLE: &'static str = "users";

    fn id(&self) -> u32 {
        self.id
    }
}

impl Record for Property {
    const TABLE: &'static str = "properties";

    fn id(&self) -> u32 {
        self.id
    }
}

impl Featured for Property {
    fn is_featured(&self) -> bool {
        self.is_featured
    }

    fn featured_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Record for BlogPost {
    const TABLE: &'static str = "blog_posts";

    fn id(&self) -> u32 {
        self.id
    }
}

impl Featured for BlogPost {
    fn is_featured(&self) -> bool {
        self.is_featured
    }

    fn featured_at(&self) -> DateTime<Utc> {
        self.published_date
    }
}

impl Record for ContactSubmission {
    const TABLE: &'static str = "contact_submissions";

    fn id(&self) -> u32 {
        self.id
    }
}

/// Rows keyed by id. Ids only grow, so key order is insertion order.
struct Table<T> {
    rows: BTreeMap<u32, T>,
    next_id: u32,
}

impl<T: Record> Table<T> {
    fn new() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: u32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn filter(&self, predicate: &dyn Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|&r| predicate(r)).cloned().collect()
    }

    fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.rows.values().find(|&r| predicate(r)).cloned()
    }

    /// Assign the next id, build the row with it and store it. `build` runs
    /// under the table's write guard, so timestamps it stamps follow id order.
    fn insert_with(&mut self, build: impl FnOnce(u32) -> T) -> StoreResult<T> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted { table: T::TABLE })?;

        let row = build(id);
        debug_assert_eq!(row.id(), id);
        self.rows.insert(id, row.clone());
        Ok(row)
    }

    fn update_with(&mut self, id: u32, change: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        change(row);
        Some(row.clone())
    }

    fn remove(&mut self, id: u32) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<T: Featured> Table<T> {
    /// Featured rows, newest first. `sort_by` is stable, so rows sharing a
    /// timestamp stay in insertion order.
    fn featured(&self, limit: usize) -> Vec<T> {
        let mut rows: Vec<T> = self.rows.values().filter(|r| r.is_featured()).cloned().collect();
        rows.sort_by(|a, b| b.featured_at().cmp(&a.featured_at()));
        rows.truncate(limit);
        rows
    }
}

fn read<T: Record>(lock: &RwLock<Table<T>>) -> StoreResult<RwLockReadGuard<'_, Table<T>>> {
    lock.read().map_err(|_| StoreError::Poisoned { table: T::TABLE })
}

fn write<T: Record>(lock: &RwLock<Table<T>>) -> StoreResult<RwLockWriteGuard<'_, Table<T>>> {
    lock.write().map_err(|_| StoreError::Poisoned { table: T::TABLE })
}

// ============================================================================
// IN-MEMORY STORAGE
// ============================================================================

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Process-lifetime storage. Owned by the entry point and shared by handle;
/// every test gets its own fresh instance.
pub struct MemStorage {
    users: RwLock<Table<User>>,
    properties: RwLock<Table<Property>>,
    blog_posts: RwLock<Table<BlogPost>>,
    contact_submissions: RwLock<Table<ContactSubmission>>,
    clock: Clock,
}

impl MemStorage {
    /// Empty storage stamping records with the wall clock
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Empty storage stamping records with `clock`
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        MemStorage {
            users: RwLock::new(Table::new()),
            properties: RwLock::new(Table::new()),
            blog_posts: RwLock::new(Table::new()),
            contact_submissions: RwLock::new(Table::new()),
            clock: Arc::new(clock),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemStorage {
    // ========================================================================
    // USERS
    // ========================================================================

    fn get_user(&self, id: u32) -> StoreResult<Option<User>> {
        Ok(read(&self.users)?.get(id))
    }

    fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(read(&self.users)?.find(|u| u.username == username))
    }

    fn create_user(&self, user: NewUser) -> StoreResult<User> {
        let mut users = write(&self.users)?;

        // Checked under the same guard as the insert
        if users.find(|u| u.username == user.username).is_some() {
            return Err(StoreError::DuplicateUsername {
                username: user.username,
            });
        }

        let created = users.insert_with(|id| User::from_new(id, user))?;
        debug!(id = created.id, "user created");
        Ok(created)
    }

    // ========================================================================
    // PROPERTIES
    // ========================================================================

    fn get_all_properties(&self) -> StoreResult<Vec<Property>> {
        Ok(read(&self.properties)?.all())
    }

    fn get_property(&self, id: u32) -> StoreResult<Option<Property>> {
        Ok(read(&self.properties)?.get(id))
    }

    fn query_properties(&self, predicate: &dyn Fn(&Property) -> bool) -> StoreResult<Vec<Property>> {
        Ok(read(&self.properties)?.filter(predicate))
    }

    fn get_featured_properties(&self, limit: Option<usize>) -> StoreResult<Vec<Property>> {
        let limit = limit.unwrap_or(DEFAULT_FEATURED_PROPERTIES);
        Ok(read(&self.properties)?.featured(limit))
    }

    fn create_property(&self, property: NewProperty) -> StoreResult<Property> {
        let created = write(&self.properties)?
            .insert_with(|id| Property::from_new(id, property, self.now()))?;
        debug!(id = created.id, property_type = %created.property_type, "property created");
        Ok(created)
    }

    fn update_property(&self, id: u32, patch: PropertyPatch) -> StoreResult<Option<Property>> {
        let updated = write(&self.properties)?.update_with(id, |p| p.apply(patch));
        debug!(id, found = updated.is_some(), "property update");
        Ok(updated)
    }

    fn delete_property(&self, id: u32) -> StoreResult<bool> {
        let removed = write(&self.properties)?.remove(id);
        debug!(id, removed, "property delete");
        Ok(removed)
    }

    // ========================================================================
    // BLOG POSTS
    // ========================================================================

    fn get_all_blog_posts(&self) -> StoreResult<Vec<BlogPost>> {
        Ok(read(&self.blog_posts)?.all())
    }

    fn get_blog_post(&self, id: u32) -> StoreResult<Option<BlogPost>> {
        Ok(read(&self.blog_posts)?.get(id))
    }

    fn query_blog_posts(&self, predicate: &dyn Fn(&BlogPost) -> bool) -> StoreResult<Vec<BlogPost>> {
        Ok(read(&self.blog_posts)?.filter(predicate))
    }

    fn get_featured_blog_posts(&self, limit: Option<usize>) -> StoreResult<Vec<BlogPost>> {
        let limit = limit.unwrap_or(DEFAULT_FEATURED_BLOG_POSTS);
        Ok(read(&self.blog_posts)?.featured(limit))
    }

    fn create_blog_post(&self, post: NewBlogPost) -> StoreResult<BlogPost> {
        let created = write(&self.blog_posts)?
            .insert_with(|id| BlogPost::from_new(id, post, self.now()))?;
        debug!(id = created.id, category = %created.category, "blog post created");
        Ok(created)
    }

    fn update_blog_post(&self, id: u32, patch: BlogPostPatch) -> StoreResult<Option<BlogPost>> {
        let updated = write(&self.blog_posts)?.update_with(id, |p| p.apply(patch));
        debug!(id, found = updated.is_some(), "blog post update");
        Ok(updated)
    }

    fn delete_blog_post(&self, id: u32) -> StoreResult<bool> {
        let removed = write(&self.blog_posts)?.remove(id);
        debug!(id, removed, "blog post delete");
        Ok(removed)
    }

    // ========================================================================
    // CONTACT SUBMISSIONS
    // ========================================================================

    fn create_contact_submission(&self, submission: NewContactSubmission) -> StoreResult<ContactSubmission> {
        let created = write(&self.contact_submissions)?
            .insert_with(|id| ContactSubmission::from_new(id, submission, self.now()))?;
        debug!(id = created.id, "contact submission received");
        Ok(created)
    }

    fn get_all_contact_submissions(&self) -> StoreResult<Vec<ContactSubmission>> {
        Ok(read(&self.contact_submissions)?.all())
    }

    fn get_contact_submission(&self, id: u32) -> StoreResult<Option<ContactSubmission>> {
        Ok(read(&self.contact_submissions)?.get(id))
    }

    fn mark_contact_submission_read(&self, id: u32) -> StoreResult<Option<ContactSubmission>> {
        Ok(write(&self.contact_submissions)?.update_with(id, ContactSubmission::mark_read))
    }

    fn counts(&self) -> StoreResult<RecordCounts> {
        Ok(RecordCounts {
            users: read(&self.users)?.len(),
            properties: read(&self.properties)?.len(),
            blog_posts: read(&self.blog_posts)?.len(),
            contact_submissions: read(&self.contact_submissions)?.len(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

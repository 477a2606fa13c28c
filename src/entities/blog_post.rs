// 📰 Blog Post Entity
//
// category is free text and filtered by exact, case-sensitive match.
// publishedDate is stamped by the storage engine at creation.

use crate::schema::{FieldReader, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u32,
    pub title: String,
    /// Rich text / markup body
    pub content: String,
    pub summary: String,
    pub author_name: String,
    pub category: String,
    pub featured_image: String,
    pub published_date: DateTime<Utc>,
    pub is_featured: bool,
}

impl BlogPost {
    pub(crate) fn from_new(id: u32, new: NewBlogPost, published_date: DateTime<Utc>) -> Self {
        BlogPost {
            id,
            title: new.title,
            content: new.content,
            summary: new.summary,
            author_name: new.author_name,
            category: new.category,
            featured_image: new.featured_image,
            published_date,
            is_featured: new.is_featured,
        }
    }

    pub fn apply(&mut self, patch: BlogPostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(summary) = patch.summary {
            self.summary = summary;
        }
        if let Some(author_name) = patch.author_name {
            self.author_name = author_name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(featured_image) = patch.featured_image {
            self.featured_image = featured_image;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub author_name: String,
    pub category: String,
    pub featured_image: String,
    pub is_featured: bool,
}

impl NewBlogPost {
    pub fn from_json(input: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input);
        let post = NewBlogPost {
            title: reader.required_text("title"),
            content: reader.required_text("content"),
            summary: reader.required_text("summary"),
            author_name: reader.required_text("authorName"),
            category: reader.required_text("category"),
            featured_image: reader.required_text("featuredImage"),
            is_featured: reader.flag("isFeatured").unwrap_or(false),
        };
        reader.finish(post)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub author_name: Option<String>,
    pub category: Option<String>,
    pub featured_image: Option<String>,
    pub is_featured: Option<bool>,
}

impl BlogPostPatch {
    pub fn from_json(input: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input);
        let patch = BlogPostPatch {
            title: reader.text("title"),
            content: reader.text("content"),
            summary: reader.text("summary"),
            author_name: reader.text("authorName"),
            category: reader.text("category"),
            featured_image: reader.text("featuredImage"),
            is_featured: reader.flag("isFeatured"),
        };
        reader.finish(patch)
    }
}

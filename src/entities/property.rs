// 🏞️ Property Entity - Land and building listings
//
// propertyType and listingStatus are closed enumerations; the string form
// only exists on the wire. createdAt is stamped by the storage engine and
// no patch can touch it.

use crate::schema::{Choice, FieldReader, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRICE_UNIT: &str = "₹";
pub const DEFAULT_PRICE_SUFFIX: &str = "";
pub const DEFAULT_AREA_UNIT: &str = "sq.ft";

// ============================================================================
// PROPERTY TYPE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Commercial,
    /// Agricultural and development plots
    #[default]
    Land,
    Industrial,
}

impl Choice for PropertyType {
    const VARIANTS: &'static [&'static str] = &["residential", "commercial", "land", "industrial"];

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "residential" => Some(PropertyType::Residential),
            "commercial" => Some(PropertyType::Commercial),
            "land" => Some(PropertyType::Land),
            "industrial" => Some(PropertyType::Industrial),
            _ => None,
        }
    }

    fn as_wire(&self) -> &'static str {
        match self {
            PropertyType::Residential => "residential",
            PropertyType::Commercial => "commercial",
            PropertyType::Land => "land",
            PropertyType::Industrial => "industrial",
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| Self::invalid_message(s))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ============================================================================
// LISTING STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    ForSale,
    ForRent,
    ForLease,
    Sold,
    Rented,
}

impl Choice for ListingStatus {
    const VARIANTS: &'static [&'static str] = &["for_sale", "for_rent", "for_lease", "sold", "rented"];

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "for_sale" => Some(ListingStatus::ForSale),
            "for_rent" => Some(ListingStatus::ForRent),
            "for_lease" => Some(ListingStatus::ForLease),
            "sold" => Some(ListingStatus::Sold),
            "rented" => Some(ListingStatus::Rented),
            _ => None,
        }
    }

    fn as_wire(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "for_sale",
            ListingStatus::ForRent => "for_rent",
            ListingStatus::ForLease => "for_lease",
            ListingStatus::Sold => "sold",
            ListingStatus::Rented => "rented",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| Self::invalid_message(s))
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ============================================================================
// PROPERTY (full record)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: u32,
    pub title: String,
    pub description: String,

    // ========================================================================
    // PRICE & AREA
    // ========================================================================
    /// Whole currency units, no minor unit
    pub price: i64,
    pub price_unit: String,
    /// Display suffix such as "/acre"
    pub price_suffix: String,
    pub area: i64,
    pub area_unit: String,

    /// Null for land
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,

    // ========================================================================
    // LOCATION
    // ========================================================================
    pub location: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
    /// Decimal degrees, kept as the string the client sent
    pub latitude: Option<String>,
    pub longitude: Option<String>,

    // ========================================================================
    // CLASSIFICATION & PRESENTATION
    // ========================================================================
    pub property_type: PropertyType,
    pub listing_status: ListingStatus,
    pub featured_image: String,
    pub is_featured: bool,
    pub amenities: Option<Vec<String>>,

    pub created_at: DateTime<Utc>,
}

impl Property {
    pub(crate) fn from_new(id: u32, new: NewProperty, created_at: DateTime<Utc>) -> Self {
        Property {
            id,
            title: new.title,
            description: new.description,
            price: new.price,
            price_unit: new.price_unit,
            price_suffix: new.price_suffix,
            area: new.area,
            area_unit: new.area_unit,
            bedrooms: new.bedrooms,
            bathrooms: new.bathrooms,
            location: new.location,
            address: new.address,
            city: new.city,
            state: new.state,
            zip_code: new.zip_code,
            latitude: new.latitude,
            longitude: new.longitude,
            property_type: new.property_type,
            listing_status: new.listing_status,
            featured_image: new.featured_image,
            is_featured: new.is_featured,
            amenities: new.amenities,
            created_at,
        }
    }

    /// Overwrite every field present in `patch`; absent fields are kept
    pub fn apply(&mut self, patch: PropertyPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(price_unit) = patch.price_unit {
            self.price_unit = price_unit;
        }
        if let Some(price_suffix) = patch.price_suffix {
            self.price_suffix = price_suffix;
        }
        if let Some(area) = patch.area {
            self.area = area;
        }
        if let Some(area_unit) = patch.area_unit {
            self.area_unit = area_unit;
        }
        if let Some(bedrooms) = patch.bedrooms {
            self.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = patch.bathrooms {
            self.bathrooms = bathrooms;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
        if let Some(state) = patch.state {
            self.state = state;
        }
        if let Some(zip_code) = patch.zip_code {
            self.zip_code = zip_code;
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = longitude;
        }
        if let Some(property_type) = patch.property_type {
            self.property_type = property_type;
        }
        if let Some(listing_status) = patch.listing_status {
            self.listing_status = listing_status;
        }
        if let Some(featured_image) = patch.featured_image {
            self.featured_image = featured_image;
        }
        if let Some(is_featured) = patch.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(amenities) = patch.amenities {
            self.amenities = amenities;
        }
    }
}

// ============================================================================
// INSERTABLE SHAPE
// ============================================================================

/// Normalized insertable property: display defaults already applied
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: i64,
    pub price_unit: String,
    pub price_suffix: String,
    pub area: i64,
    pub area_unit: String,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub location: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub property_type: PropertyType,
    pub listing_status: ListingStatus,
    pub featured_image: String,
    pub is_featured: bool,
    pub amenities: Option<Vec<String>>,
}

impl NewProperty {
    pub fn from_json(input: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input);

        let property = NewProperty {
            title: reader.required_text("title"),
            description: reader.required_text("description"),
            price: reader.required_integer("price", 0),
            price_unit: reader.display_text_or("priceUnit", DEFAULT_PRICE_UNIT),
            price_suffix: reader.display_text_or("priceSuffix", DEFAULT_PRICE_SUFFIX),
            area: reader.required_integer("area", 0),
            area_unit: reader.display_text_or("areaUnit", DEFAULT_AREA_UNIT),
            bedrooms: reader.nullable_integer("bedrooms", 0).flatten(),
            bathrooms: reader.nullable_integer("bathrooms", 0).flatten(),
            location: reader.required_text("location"),
            address: reader.required_text("address"),
            city: reader.required_text("city"),
            state: reader.required_text("state"),
            zip_code: reader.nullable_text("zipCode").flatten(),
            latitude: reader.nullable_text("latitude").flatten(),
            longitude: reader.nullable_text("longitude").flatten(),
            property_type: reader.required_choice("propertyType"),
            listing_status: reader.required_choice("listingStatus"),
            featured_image: reader.required_text("featuredImage"),
            is_featured: reader.flag("isFeatured").unwrap_or(false),
            amenities: reader.nullable_list("amenities").flatten(),
        };

        check_coordinate(&mut reader, "latitude", property.latitude.as_deref(), 90.0);
        check_coordinate(&mut reader, "longitude", property.longitude.as_deref(), 180.0);

        reader.finish(property)
    }
}

// ============================================================================
// PARTIAL SHAPE
// ============================================================================

/// Fields to overwrite on update. `None` = leave as is; for nullable
/// fields `Some(None)` clears the stored value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub price_unit: Option<String>,
    pub price_suffix: Option<String>,
    pub area: Option<i64>,
    pub area_unit: Option<String>,
    pub bedrooms: Option<Option<i64>>,
    pub bathrooms: Option<Option<i64>>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<Option<String>>,
    pub latitude: Option<Option<String>>,
    pub longitude: Option<Option<String>>,
    pub property_type: Option<PropertyType>,
    pub listing_status: Option<ListingStatus>,
    pub featured_image: Option<String>,
    pub is_featured: Option<bool>,
    pub amenities: Option<Option<Vec<String>>>,
}

impl PropertyPatch {
    pub fn from_json(input: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input);

        let patch = PropertyPatch {
            title: reader.text("title"),
            description: reader.text("description"),
            price: reader.integer("price", 0),
            price_unit: reader.display_text("priceUnit"),
            price_suffix: reader.display_text("priceSuffix"),
            area: reader.integer("area", 0),
            area_unit: reader.display_text("areaUnit"),
            bedrooms: reader.nullable_integer("bedrooms", 0),
            bathrooms: reader.nullable_integer("bathrooms", 0),
            location: reader.text("location"),
            address: reader.text("address"),
            city: reader.text("city"),
            state: reader.text("state"),
            zip_code: reader.nullable_text("zipCode"),
            latitude: reader.nullable_text("latitude"),
            longitude: reader.nullable_text("longitude"),
            property_type: reader.choice("propertyType"),
            listing_status: reader.choice("listingStatus"),
            featured_image: reader.text("featuredImage"),
            is_featured: reader.flag("isFeatured"),
            amenities: reader.nullable_list("amenities"),
        };

        let latitude = patch.latitude.clone().flatten();
        let longitude = patch.longitude.clone().flatten();
        check_coordinate(&mut reader, "latitude", latitude.as_deref(), 90.0);
        check_coordinate(&mut reader, "longitude", longitude.as_deref(), 180.0);

        reader.finish(patch)
    }
}

/// Coordinates must be decimal degrees within +/- `limit`
fn check_coordinate(reader: &mut FieldReader<'_>, field: &str, value: Option<&str>, limit: f64) {
    let Some(raw) = value else {
        return;
    };
    match raw.trim().parse::<f64>() {
        Ok(degrees) if degrees.is_finite() && degrees.abs() <= limit => {}
        Ok(_) => reader.push(field, format!("Must be between -{} and {}", limit, limit)),
        Err(_) => reader.push(field, "Expected a decimal number"),
    }
}

// ============================================================================
// TESTS
// ============================================================================

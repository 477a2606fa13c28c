// 🌱 Sample catalog
//
// Land listings and articles loaded at server start-up when
// `catalog.seed_sample_data` is on. Everything goes through the normal
// validate → create path, so sample records get ids and timestamps exactly
// like client-created ones.

use crate::entities::{NewBlogPost, NewProperty};
use crate::storage::{RecordCounts, Storage};
use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::info;

fn sample_properties() -> Vec<Value> {
    vec![
        json!({
            "title": "Premium Agricultural Land in Fertile Valley",
            "description": "Fertile agricultural land with rich soil and a year-round water supply from a nearby river. Soil has been tested and suits multiple crop varieties.",
            "price": 2500000,
            "priceUnit": "₹",
            "priceSuffix": "/acre",
            "area": 5,
            "areaUnit": "acres",
            "bedrooms": null,
            "bathrooms": null,
            "location": "Nashik, Maharashtra",
            "address": "Wagholi Village, Nashik",
            "city": "Nashik",
            "state": "Maharashtra",
            "zipCode": "422003",
            "latitude": "19.9975",
            "longitude": "73.7898",
            "propertyType": "land",
            "listingStatus": "for_sale",
            "featuredImage": "/images/listings/nashik-valley.jpg",
            "isFeatured": true,
            "amenities": ["Natural Water Source", "Rich Soil", "Road Access", "Electricity Connection", "Flat Terrain", "Clear Title"]
        }),
        json!({
            "title": "Commercial Plot Near Highway Junction",
            "description": "Corner plot at a highway junction with high visibility and traffic flow. Commercial zone approvals in place; suited to retail, showrooms or a commercial complex.",
            "price": 12000000,
            "priceUnit": "₹",
            "priceSuffix": "",
            "area": 10000,
            "areaUnit": "sq.ft",
            "bedrooms": null,
            "bathrooms": null,
            "location": "Gurgaon, Haryana",
            "address": "Sector 83, NH-8 Junction",
            "city": "Gurgaon",
            "state": "Haryana",
            "zipCode": "122004",
            "latitude": "28.4595",
            "longitude": "77.0266",
            "propertyType": "land",
            "listingStatus": "for_sale",
            "featuredImage": "/images/listings/gurgaon-junction.jpg",
            "isFeatured": true,
            "amenities": ["Highway Frontage", "Commercial Zoning", "All Utilities", "Corner Plot", "High Visibility", "Development Potential"]
        }),
        json!({
            "title": "Premium Residential Plot in Gated Community",
            "description": "Ready-to-build plot in a secure gated community with landscaped gardens, walking paths and recreational facilities. All utilities connected.",
            "price": 48000,
            "priceUnit": "₹",
            "priceSuffix": "/sq.yd",
            "area": 300,
            "areaUnit": "sq.yd",
            "bedrooms": null,
            "bathrooms": null,
            "location": "Greater Noida, Delhi NCR",
            "address": "Sector 123, Greater Noida",
            "city": "Greater Noida",
            "state": "Uttar Pradesh",
            "zipCode": "201310",
            "latitude": "28.4744",
            "longitude": "77.5040",
            "propertyType": "land",
            "listingStatus": "for_sale",
            "featuredImage": "/images/listings/greater-noida-plot.jpg",
            "isFeatured": true,
            "amenities": ["Gated Community", "24/7 Security", "Parks", "Club House", "Water Supply", "Electricity"]
        }),
        json!({
            "title": "Large Agricultural Land with Water Reservoir",
            "description": "Expansive, well-maintained farmland with a private natural reservoir, suitable for large-scale farming operations.",
            "price": 35000000,
            "priceUnit": "₹",
            "priceSuffix": "",
            "area": 15,
            "areaUnit": "acres",
            "bedrooms": null,
            "bathrooms": null,
            "location": "Pune Rural, Maharashtra",
            "address": "Khed Taluka, Pune District",
            "city": "Pune",
            "state": "Maharashtra",
            "zipCode": "410501",
            "latitude": "18.8266",
            "longitude": "73.8777",
            "propertyType": "land",
            "listingStatus": "for_sale",
            "featuredImage": "/images/listings/khed-reservoir.jpg",
            "isFeatured": false,
            "amenities": ["Water Reservoir", "Farm Road Access", "Electricity Connection", "Fenced Boundary", "Irrigation System", "Farm Equipment Shed"]
        }),
        json!({
            "title": "Industrial Land Plot Near Port",
            "description": "Industrial zoned plot near the port with strong logistics connectivity. Suited to warehousing, manufacturing or logistics operations.",
            "price": 55000000,
            "priceUnit": "₹",
            "priceSuffix": "",
            "area": 2,
            "areaUnit": "acres",
            "bedrooms": null,
            "bathrooms": null,
            "location": "JNPT Area, Navi Mumbai",
            "address": "MIDC Industrial Area, Uran",
            "city": "Navi Mumbai",
            "state": "Maharashtra",
            "zipCode": "400702",
            "latitude": "18.9633",
            "longitude": "72.9615",
            "propertyType": "land",
            "listingStatus": "for_sale",
            "featuredImage": "/images/listings/uran-industrial.jpg",
            "isFeatured": false,
            "amenities": ["Industrial Zoning", "Port Proximity", "Highway Access", "Power Substation", "Water Connection", "Security Surveillance"]
        }),
    ]
}

fn sample_blog_posts() -> Vec<Value> {
    vec![
        json!({
            "title": "5 Real Estate Investment Trends to Watch in 2023",
            "content": "<h2>1. Sustainable and Green Buildings</h2><p>Certified green properties command premium prices.</p><h2>2. Technology-Integrated Properties</h2><p>Smart infrastructure drives demand.</p><h2>3. Suburban and Tier 2 City Growth</h2><p>Buyers look beyond metro centres.</p><h2>4. Build-to-Rent Developments</h2><p>Purpose-built rental communities are emerging.</p><h2>5. Data-Driven Investment Strategies</h2><p>Analytics sharpen valuation and risk assessment.</p>",
            "summary": "Discover the emerging trends shaping the real estate market and how investors can capitalize on these opportunities for maximum returns.",
            "authorName": "Rajiv Sharma",
            "category": "Investment",
            "featuredImage": "/images/blog/investment-trends.jpg",
            "isFeatured": true
        }),
        json!({
            "title": "Tax Benefits of Real Estate Investment in India",
            "content": "<h2>Income Tax Deductions on Home Loans</h2><p>Section 24 interest and Section 80C principal deductions.</p><h2>Capital Gains Tax Benefits</h2><p>Exemptions under Sections 54, 54EC and 54F.</p><h2>Rental Income Optimization</h2><p>Standard deduction, municipal taxes and interest on borrowed capital.</p><h2>Joint Ownership Benefits</h2><p>Each co-owner claims deductions independently.</p>",
            "summary": "A comprehensive guide to understanding the tax advantages of investing in real estate properties and how to maximize your tax savings.",
            "authorName": "Priya Iyer",
            "category": "Finance",
            "featuredImage": "/images/blog/tax-benefits.jpg",
            "isFeatured": true
        }),
        json!({
            "title": "Beginner's Guide to Commercial Real Estate Investment",
            "content": "<h2>Understanding Commercial Real Estate Categories</h2><p>Office, retail, industrial, hospitality and multi-family.</p><h2>Evaluating Commercial Properties</h2><p>Cap rate, NOI, cash-on-cash return and IRR.</p><h2>Financing Commercial Investments</h2><p>Higher down payments and shorter terms.</p><h2>Understanding Lease Structures</h2><p>Triple net, modified gross and full-service leases.</p>",
            "summary": "Learn the fundamentals of commercial property investment, including risk assessment, financing options, and key factors to consider before investing.",
            "authorName": "Vikram Mehta",
            "category": "Commercial",
            "featuredImage": "/images/blog/commercial-guide.jpg",
            "isFeatured": true
        }),
    ]
}

/// Insert the sample listings and articles, returning the resulting counts
pub fn load_sample_data(storage: &dyn Storage) -> Result<RecordCounts> {
    for input in sample_properties() {
        let property = NewProperty::from_json(&input).context("invalid sample property")?;
        storage.create_property(property)?;
    }

    for input in sample_blog_posts() {
        let post = NewBlogPost::from_json(&input).context("invalid sample blog post")?;
        storage.create_blog_post(post)?;
    }

    let counts = storage.counts()?;
    info!(
        properties = counts.properties,
        blog_posts = counts.blog_posts,
        "sample catalog loaded"
    );
    Ok(counts)
}

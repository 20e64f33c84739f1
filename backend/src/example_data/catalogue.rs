//! The demo tour catalogue.

use crate::domain::TourDraft;

struct DemoTour {
    name: &'static str,
    description: &'static str,
    price: i64,
    duration: i64,
    max_group_size: i64,
    location: &'static str,
    image: &'static str,
    images: &'static [&'static str],
    featured: bool,
    rating: f32,
    num_reviews: i64,
}

const UNSPLASH: &str = "https://images.unsplash.com";

const DEMO_TOURS: [DemoTour; 5] = [
    DemoTour {
        name: "Paris City Explorer",
        description: "Experience the magic of Paris with our comprehensive city tour. \
                      Visit the Eiffel Tower, Louvre Museum, and Notre-Dame Cathedral.",
        price: 299,
        duration: 3,
        max_group_size: 15,
        location: "Paris, France",
        image: "photo-1502602898657-3e91760cbb34",
        images: &["photo-1499856871958-5b9627545d1a", "photo-1543349689-9a4d426bee8e"],
        featured: true,
        rating: 4.8,
        num_reviews: 128,
    },
    DemoTour {
        name: "Tokyo Adventure",
        description: "Discover the vibrant city of Tokyo, from traditional temples to \
                      modern districts. Experience authentic Japanese culture and cuisine.",
        price: 599,
        duration: 5,
        max_group_size: 12,
        location: "Tokyo, Japan",
        image: "photo-1540959733332-eab4deabeeaf",
        images: &["photo-1536098561742-ca998e48cbcc", "photo-1542051841857-5f90071e7989"],
        featured: true,
        rating: 4.9,
        num_reviews: 95,
    },
    DemoTour {
        name: "New York City Tour",
        description: "Explore the Big Apple with our guided tour. Visit Times Square, \
                      Central Park, and the Statue of Liberty.",
        price: 399,
        duration: 4,
        max_group_size: 20,
        location: "New York, USA",
        image: "photo-1496442226666-8d4d0e62e6e9",
        images: &["photo-1496442226666-8d4d0e62e6e9"],
        featured: false,
        rating: 4.7,
        num_reviews: 156,
    },
    DemoTour {
        name: "Rome Historical Tour",
        description: "Step back in time with our Rome historical tour. Visit the \
                      Colosseum, Roman Forum, and Vatican City.",
        price: 349,
        duration: 3,
        max_group_size: 15,
        location: "Rome, Italy",
        image: "photo-1552832230-c0197dd311b5",
        images: &["photo-1552832230-c0197dd311b5"],
        featured: true,
        rating: 4.8,
        num_reviews: 112,
    },
    DemoTour {
        name: "Bali Paradise",
        description: "Experience the beauty of Bali with our island tour. Visit temples, \
                      beaches, and rice terraces.",
        price: 499,
        duration: 6,
        max_group_size: 10,
        location: "Bali, Indonesia",
        image: "photo-1537996194471-e657df975ab4",
        images: &["photo-1537996194471-e657df975ab4"],
        featured: true,
        rating: 4.9,
        num_reviews: 89,
    },
];

fn photo(id: &str) -> String {
    format!("{UNSPLASH}/{id}")
}

impl From<&DemoTour> for TourDraft {
    fn from(demo: &DemoTour) -> Self {
        Self {
            name: demo.name.to_owned(),
            description: demo.description.to_owned(),
            price: demo.price,
            duration: demo.duration,
            max_group_size: demo.max_group_size,
            location: demo.location.to_owned(),
            image: photo(demo.image),
            images: demo.images.iter().map(|id| photo(id)).collect(),
            featured: demo.featured,
            rating: demo.rating,
            num_reviews: demo.num_reviews,
            difficulty: None,
            category: None,
            start_dates: Vec::new(),
            available: true,
        }
    }
}

/// Drafts for the five demo tours, in seeding order.
#[must_use]
pub fn demo_tours() -> Vec<TourDraft> {
    DEMO_TOURS.iter().map(TourDraft::from).collect()
}

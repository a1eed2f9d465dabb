//! Seed data for the mock catalog.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{Category, CategoryId, Product, ProductId, ProductImage, Tag, UserId};

pub fn categories() -> Vec<Category> {
    [
        (1, "Electrónicos", "Dispositivos electrónicos y gadgets"),
        (2, "Ropa", "Ropa y accesorios de moda"),
        (3, "Hogar", "Artículos para el hogar y decoración"),
        (4, "Deportes", "Equipamiento deportivo y fitness"),
        (5, "Libros", "Libros y material educativo"),
    ]
    .into_iter()
    .map(|(id, name, description)| Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        description: Some(description.to_string()),
        image_url: None,
    })
    .collect()
}

struct Seed {
    id: u32,
    name: &'static str,
    description: &'static str,
    cents: i64,
    stock: u32,
    category: u32,
    brand: Option<&'static str>,
    tags: &'static [(u32, &'static str, &'static str)],
    featured: bool,
    image: &'static str,
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        name: "iPhone 15 Pro",
        description: "El último modelo de iPhone con tecnología Pro",
        cents: 99_999,
        stock: 50,
        category: 1,
        brand: Some("Apple"),
        tags: &[(1, "smartphone", "#3182CE")],
        featured: true,
        image: "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=400",
    },
    Seed {
        id: 2,
        name: "MacBook Air M2",
        description: "Laptop ultradelgada con chip M2 de Apple",
        cents: 129_999,
        stock: 30,
        category: 1,
        brand: Some("Apple"),
        tags: &[(2, "laptop", "#805AD5")],
        featured: true,
        image: "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=400",
    },
    Seed {
        id: 3,
        name: "Camiseta Premium",
        description: "Camiseta de algodón 100% premium",
        cents: 2_999,
        stock: 100,
        category: 2,
        brand: None,
        tags: &[(3, "algodón", "#38A169")],
        featured: false,
        image: "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400",
    },
    Seed {
        id: 4,
        name: "Silla Ergonómica",
        description: "Silla de oficina ergonómica con soporte lumbar",
        cents: 29_999,
        stock: 20,
        category: 3,
        brand: None,
        tags: &[(4, "oficina", "#D69E2E")],
        featured: false,
        image: "https://images.unsplash.com/photo-1506439773649-6e0eb8cfb237?w=400",
    },
    Seed {
        id: 5,
        name: "Zapatillas Running",
        description: "Zapatillas deportivas para running de alto rendimiento",
        cents: 12_999,
        stock: 75,
        category: 4,
        brand: Some("Nike"),
        tags: &[(5, "running", "#E53E3E")],
        featured: false,
        image: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400",
    },
    Seed {
        id: 6,
        name: "JavaScript: The Good Parts",
        description: "Libro clásico sobre JavaScript por Douglas Crockford",
        cents: 3_999,
        stock: 40,
        category: 5,
        brand: None,
        tags: &[],
        featured: false,
        image: "https://images.unsplash.com/photo-1544716278-ca5e3f4abd8c?w=400",
    },
];

/// Owner of every seeded product: the built-in administrator.
pub const SEED_OWNER: UserId = UserId::new(1);

fn seeded_at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|seed| {
            let id = ProductId::new(seed.id);
            let created_at = seeded_at(seed.id);
            Product {
                id,
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                price: Decimal::new(seed.cents, 2),
                stock: seed.stock,
                category_id: CategoryId::new(seed.category),
                brand: seed.brand.map(str::to_string),
                owner_id: SEED_OWNER,
                images: ProductImage::gallery(id, seed.name, vec![seed.image.to_string()]),
                tags: seed
                    .tags
                    .iter()
                    .map(|(tag_id, name, color)| Tag::new(*tag_id, *name, *color))
                    .collect(),
                is_active: true,
                featured: seed.featured,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

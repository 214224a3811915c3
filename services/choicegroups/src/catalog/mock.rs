//! Synthetic catalog for demos and smoke runs

use crate::catalog::product::Product;

const SIZES: [&str; 3] = ["Small", "Medium", "Large"];
const SHAKE_FLAVORS: [&str; 3] = ["Vanilla", "Chocolate", "Strawberry"];
const WHIPPED_CREAM: &str = "Whipped Cream";

/// Generate a mock catalog with a few product families:
/// - Burger: every size, with and without Cheese
/// - Fries: a random subset of at least two sizes
/// - Shake: one product per flavor, each can add Whipped Cream, plus one
///   vanilla shake that comes with it
/// - Whipped Cream: single add-on product
///
/// The seed decides the Fries sizes and the order products appear in.
pub fn generate_mock_catalog(seed: u64) -> Vec<Product> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut products = Vec::new();

    for size in SIZES {
        let code = format!("burger-{}", size.to_lowercase());
        products.push(Product::new(&code, "Burger").with_discriminators(&[size]));
        products.push(
            Product::new(&format!("{}-cheese", code), "Burger")
                .with_discriminators(&[size, "Cheese"]),
        );
    }

    let skipped = if rng.bool() { Some(rng.usize(..SIZES.len())) } else { None };
    for (i, size) in SIZES.iter().enumerate() {
        if Some(i) == skipped {
            continue;
        }
        products.push(
            Product::new(&format!("fries-{}", size.to_lowercase()), "Fries")
                .with_discriminators(&[*size]),
        );
    }

    products.push(Product::new("whipped-cream", WHIPPED_CREAM));
    for flavor in SHAKE_FLAVORS {
        products.push(
            Product::new(&format!("shake-{}", flavor.to_lowercase()), "Shake")
                .with_discriminators(&[flavor])
                .with_can_add("whipped-cream"),
        );
    }
    products.push(
        Product::new("shake-vanilla-whipped", "Shake")
            .with_discriminators(&["Vanilla", WHIPPED_CREAM]),
    );

    rng.shuffle(&mut products);
    products
}

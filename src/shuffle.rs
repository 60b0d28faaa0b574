use rand::Rng;

/// Fresh random presentation order over `[0, count)`, one per takeout entry.
pub fn random_order(count: usize) -> Vec<usize> {
    order_with_rng(count, &mut rand::thread_rng())
}

/// Fisher-Yates over the index range, generic over the generator so tests
/// can run it seeded.
pub fn order_with_rng(count: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    order
}

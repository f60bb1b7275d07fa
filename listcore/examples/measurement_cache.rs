// Example: persist measured heights and seed a new engine with them.
use listcore::{Item, ListEngine, ListOptions};

fn data() -> Vec<Item<u32, ()>> {
    (0..20u32).map(|i| Item::new(i, ())).collect()
}

fn main() {
    let mut first = ListEngine::new(ListOptions::new().with_window_size(6), data())
        .expect("non-empty keyed data");
    for key in 0..20u32 {
        let _ = first.resolve_item(key, 20 + key % 3 * 10);
    }
    let cache = first.export_measurements();
    println!("exported {} heights, total_height={}", cache.len(), first.total_height());

    let mut second = ListEngine::new(ListOptions::new().with_window_size(6), data())
        .expect("non-empty keyed data");
    println!("before import: mode={:?} total_height={}", second.height_mode(), second.total_height());

    let seeded = second.import_measurements(cache);
    println!("seeded {seeded} heights");
    let _ = second.refresh_with(data()).expect("same data");
    println!("after import: mode={:?} total_height={}", second.height_mode(), second.total_height());
}

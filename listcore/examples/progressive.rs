// Example: unknown heights resolved one measurement at a time.
use listcore::{Item, ListEngine, ListOptions, Resolution};

fn main() {
    let data: Vec<_> = (0..50u32).map(|i| Item::new(i, ())).collect();
    let mut list = ListEngine::new(
        ListOptions::new()
            .with_window_size(8)
            .with_on_change(Some(|items: &[listcore::VisibleItem<u32, ()>], total| {
                println!("  on_change: {} items, total_height={total}", items.len());
            })),
        data,
    )
    .expect("non-empty keyed data");

    // A measurement that arrives before its predecessor is placed is deferred.
    let early = list.resolve_item(3u32, 40).expect("known key");
    assert_eq!(early, Resolution::Deferred);

    // A renderer would measure whatever is mounted; here heights alternate 30/60.
    list.batch_update(|list| {
        for key in 0..8u32 {
            let height = if key % 2 == 0 { 30 } else { 60 };
            let _ = list.resolve_item(key, height);
        }
    });
    println!("frontier={:?} total_height={}", list.frontier(), list.total_height());

    for offset in [100, 200, 300] {
        list.on_scroll_to(offset, false);
        println!("offset={offset} window={:?}", list.window());
    }

    // Re-measuring an entry adjusts the total by the difference.
    if let Ok(Resolution::Resolved { delta }) = list.resolve_item(0u32, 45) {
        println!("re-measured key 0: delta={delta} total_height={}", list.total_height());
    }
}

// Example: fixed-height list, scrolling and the materialized window.
use listcore::{Item, ListEngine, ListOptions};

fn main() {
    let data: Vec<_> = (0..100u32)
        .map(|i| Item::new(i, format!("row {i}")).with_height(50))
        .collect();
    let mut list = ListEngine::new(
        ListOptions::new().with_window_size(12).with_viewport_height(600),
        data,
    )
    .expect("non-empty keyed data");

    println!("mode={:?} total_height={}", list.height_mode(), list.total_height());
    println!("window={:?}", list.window());

    for offset in [0, 480, 2_600, 4_990] {
        let changed = list.on_scroll_to(offset, false);
        println!(
            "offset={offset} changed={changed} direction={:?} window={:?}",
            list.direction(),
            list.window()
        );
    }

    let first = list.visible_items().first();
    println!(
        "first_visible={:?}",
        first.map(|it| (it.index(), it.translate_y(), &it.payload))
    );
}

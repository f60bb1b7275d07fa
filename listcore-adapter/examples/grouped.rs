// Example: grouped list with sticky group titles.
use listcore::{Item, ListEngine, ListOptions};
use listcore_adapter::{Group, GroupRow, GroupedSource, sticky_header};

fn main() {
    let groups = ["A", "B", "C"].into_iter().enumerate().map(|(g, name)| {
        let base = g as u32 * 100;
        let items = (0..5u32).map(|i| Item::new(base + i, i)).collect();
        Group::new(base + 99, name, items).with_title_height(24)
    });
    let source = GroupedSource::new(groups);
    let titles = source.title_indexes().to_vec();

    let mut list = ListEngine::new(ListOptions::new().with_window_size(10), source.into_entries())
        .expect("non-empty keyed data");

    list.batch_update(|list| {
        for index in 0..list.len() {
            let Some(key) = list.key_at(index).cloned() else {
                continue;
            };
            let height = match list.payload_at(index) {
                Some(GroupRow::Title(_)) => 24,
                _ => 40,
            };
            let _ = list.resolve_item(key, height);
        }
    });
    println!("total_height={}", list.total_height());

    for offset in [0, 150, 210, 230, 460] {
        list.on_scroll_to(offset, false);
        if let Some(header) = sticky_header(&list, &titles, offset) {
            let title = match list.payload_at(header.index) {
                Some(GroupRow::Title(name)) => *name,
                _ => "?",
            };
            println!("offset={offset} sticky={title} shift={}", header.shift);
        }
    }
}

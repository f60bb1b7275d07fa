// Example: measurements reported out of order, replayed in data source order.
use listcore::{Item, ListEngine, ListOptions};
use listcore_adapter::MeasureQueue;

fn main() {
    let data: Vec<_> = (0..10u32).map(|i| Item::new(i, ())).collect();
    let mut list = ListEngine::new(ListOptions::new().with_window_size(10), data)
        .expect("non-empty keyed data");
    let mut queue = MeasureQueue::<u32>::new();

    // Layout finished bottom-up for the first frame.
    for key in (1..10u32).rev() {
        queue.push(key, 30 + key);
    }
    let stats = queue.flush(&mut list);
    println!("first flush: {stats:?} pending={}", queue.len());

    queue.push(0u32, 30);
    let stats = queue.flush(&mut list);
    println!("second flush: {stats:?} pending={}", queue.len());
    println!("total_height={}", list.total_height());
}

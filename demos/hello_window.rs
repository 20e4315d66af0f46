use roda_window::SlidingWindow;
use roda_window::clock::{Clock, ManualClock};
use std::time::Duration;

const MS: u64 = 1_000_000;

fn print(step: u32, window: &SlidingWindow) {
    println!(
        "{}) Sample Count: {} Sum: {} Average: {}",
        step,
        window.count(),
        window.sum(),
        window.average()
    );
}

fn main() {
    let clock = ManualClock::new(1_000 * MS);
    let mut window = SlidingWindow::new(Duration::from_millis(300), 3);
    print(1, &window);

    window.add_sample(clock.now_nanos(), 1.0);
    print(2, &window);

    clock.advance(151 * MS);
    window.add_sample(clock.now_nanos(), 10.0);
    print(3, &window);

    clock.advance(151 * MS);
    window.add_sample(clock.now_nanos(), 100.0);
    print(4, &window);

    clock.advance(151 * MS);
    window.touch(clock.now_nanos());
    print(5, &window);

    clock.advance(151 * MS);
    window.touch(clock.now_nanos());
    print(6, &window);

    println!("\n{window}");
}

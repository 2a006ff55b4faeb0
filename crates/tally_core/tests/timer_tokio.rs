use std::time::Duration;
use tally_core::{Timer, TokioIntervalScheduler};

#[tokio::test(start_paused = true)]
async fn ticks_once_per_second_of_runtime_time() {
    let mut timer = Timer::new(TokioIntervalScheduler::try_current().unwrap());
    timer.start();

    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(timer.get_time(), 3);
}

#[tokio::test(start_paused = true)]
async fn first_tick_waits_a_full_interval() {
    let mut timer = Timer::new(TokioIntervalScheduler::try_current().unwrap());
    timer.start();

    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(timer.get_time(), 0);
}

#[tokio::test(start_paused = true)]
async fn stopped_timer_ignores_further_time() {
    let mut timer = Timer::new(TokioIntervalScheduler::try_current().unwrap());
    timer.start();
    tokio::time::sleep(Duration::from_millis(2_500)).await;

    timer.stop();
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert_eq!(timer.get_time(), 2);
    assert!(!timer.is_running());
}

#[tokio::test(start_paused = true)]
async fn double_start_does_not_double_count() {
    let mut timer = Timer::new(TokioIntervalScheduler::try_current().unwrap());
    timer.start();
    timer.start();

    tokio::time::sleep(Duration::from_millis(4_500)).await;
    assert_eq!(timer.get_time(), 4);
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_zero_and_stays_there() {
    let mut timer = Timer::new(TokioIntervalScheduler::try_current().unwrap());
    timer.start();
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    timer.reset();
    tokio::time::sleep(Duration::from_secs(3)).await;

    assert_eq!(timer.get_time(), 0);
}

use std::collections::VecDeque;

use futures::future::LocalBoxFuture;

/// Drives the queued futures with at most `sz` in flight. Results reach
/// `on_result` one at a time in completion order.
pub async fn promise_buffer<'a, T, F>(mut q: VecDeque<LocalBoxFuture<'a, T>>, sz: usize, mut on_result: F)
where
    F: FnMut(T),
{
    let sz = sz.max(1);
    let mut vec: Vec<_> = Vec::new();
    loop {
        while vec.len() < sz {
            match q.pop_front() {
                Some(x) => vec.push(x),
                None => break,
            }
        }
        if vec.is_empty() {
            break;
        }
        let (result, _index, rest) = futures::future::select_all(vec).await;
        on_result(result);
        vec = rest;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use futures::FutureExt;

    use super::*;

    #[tokio::test]
    async fn test_runs_everything() {
        let q: VecDeque<_> = (0..10).map(|i| async move { i * 2 }.boxed_local()).collect();
        let mut results = Vec::new();
        promise_buffer(q, 3, |x| results.push(x)).await;
        results.sort();
        assert_eq!(results, (0..10).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_respects_limit() {
        let in_flight = Cell::new(0);
        let peak = Cell::new(0);
        let q: VecDeque<_> = (0..8)
            .map(|_| {
                let in_flight = &in_flight;
                let peak = &peak;
                async move {
                    in_flight.set(in_flight.get() + 1);
                    peak.set(peak.get().max(in_flight.get()));
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    in_flight.set(in_flight.get() - 1);
                }
                .boxed_local()
            })
            .collect();
        promise_buffer(q, 2, |_| {}).await;
        assert_eq!(peak.get(), 2);
        assert_eq!(in_flight.get(), 0);
    }

    #[tokio::test]
    async fn test_zero_size_runs_serially() {
        let q: VecDeque<_> = (0..3).map(|i| async move { i }.boxed_local()).collect();
        let mut results = Vec::new();
        promise_buffer(q, 0, |x| results.push(x)).await;
        assert_eq!(results, vec![0, 1, 2]);
    }
}

// Below this much remaining stack a fresh segment is allocated
const RED_ZONE: usize = 100 * 1024;

const SEGMENT_SIZE: usize = 1024 * 1024;

/// Runs `f`, first growing the stack onto the heap if little of it remains.
///
/// The parser and evaluator recurse once per nesting level and bound that
/// depth themselves. Growing here keeps the bound reachable on any thread.
#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_recursion_survives_a_small_thread() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        let handle = std::thread::Builder::new()
            .stack_size(256 * 1024)
            .spawn(|| depth(100_000))
            .unwrap();
        assert_eq!(handle.join().unwrap(), 100_000);
    }
}

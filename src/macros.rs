// Re-runs the full structural check after a mutation. Compiled out of release
// builds, where the checks would turn every O(log n) operation into O(n).
macro_rules! debug_verify {
    ($structure:expr) => {
        #[cfg(debug_assertions)]
        {
            if let Err(violation) = $structure.check_invariants() {
                panic!("invariant violated: {}", violation);
            }
        }
    };
}

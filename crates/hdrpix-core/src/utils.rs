/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::collections::TryReserveError;
use alloc::vec::Vec;

/// Allocate a vector of `len` copies of `value`, returning an error
/// instead of aborting when the allocation cannot be satisfied.
pub fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>, TryReserveError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len)?;
    buffer.resize(len, value);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use crate::utils::try_alloc;

    #[test]
    fn try_alloc_reports_failure() {
        assert!(try_alloc(usize::MAX, 0_u8).is_err());
        assert_eq!(try_alloc(3, 1.0_f32).unwrap(), [1.0; 3]);
    }
}

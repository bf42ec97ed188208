/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A bounds checked reader over an in-memory buffer
//!
//! Every read checks the remaining length before touching the buffer
//! and a failed read never moves the cursor, so decoders can report an
//! error without having consumed a partial value.
use core::fmt::{Debug, Display, Formatter};

/// Errors returned by [`ByteCursor`]
pub enum ByteIoError {
    /// requested, available
    NotEnoughBytes(usize, usize),
    /// A position past the end of the buffer was requested
    SeekError(usize, usize)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::SeekError(position, len) => {
                writeln!(f, "Cannot seek to {position}, buffer length is {len}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ByteIoError {}

/// Sequential reader over a fixed length byte slice.
///
/// The cursor never reads past `data.len()`; all fallible reads
/// return [`ByteIoError::NotEnoughBytes`] instead.
#[derive(Clone)]
pub struct ByteCursor<'a> {
    stream:   &'a [u8],
    position: usize
}

impl<'a> ByteCursor<'a> {
    pub const fn new(data: &'a [u8]) -> ByteCursor<'a> {
        ByteCursor {
            stream:   data,
            position: 0
        }
    }

    /// Current offset from the start of the buffer
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Seeking to `len()` is allowed, it leaves the cursor at EOF.
    pub fn set_position(&mut self, position: usize) -> Result<(), ByteIoError> {
        if position > self.stream.len() {
            return Err(ByteIoError::SeekError(position, self.stream.len()));
        }
        self.position = position;
        Ok(())
    }

    /// Number of bytes that can still be read
    #[inline(always)]
    pub const fn remaining(&self) -> usize {
        // saturating so a bad position can never underflow
        self.stream.len().saturating_sub(self.position)
    }

    pub const fn len(&self) -> usize {
        self.stream.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Bytes from the current position to the end of the buffer
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.stream[self.position.min(self.stream.len())..]
    }

    #[inline(always)]
    pub fn read_u8(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }

    /// Look at the next `N` bytes without consuming them
    #[inline]
    pub fn peek_fixed<const N: usize>(&self) -> Result<[u8; N], ByteIoError> {
        let mut space = [0; N];

        match self.stream.get(self.position..self.position.saturating_add(N)) {
            Some(bytes) => {
                space.copy_from_slice(bytes);
                Ok(space)
            }
            None => Err(ByteIoError::NotEnoughBytes(N, self.remaining()))
        }
    }

    /// Borrow the next `num` bytes and move past them
    pub fn read_slice(&mut self, num: usize) -> Result<&'a [u8], ByteIoError> {
        let end = self
            .position
            .checked_add(num)
            .ok_or(ByteIoError::NotEnoughBytes(num, self.remaining()))?;

        match self.stream.get(self.position..end) {
            Some(bytes) => {
                self.position = end;
                Ok(bytes)
            }
            None => Err(ByteIoError::NotEnoughBytes(num, self.remaining()))
        }
    }

    pub fn skip(&mut self, num: usize) -> Result<(), ByteIoError> {
        self.read_slice(num).map(|_| ())
    }

    /// Read a line terminated by `\n`, searching at most `max_len` bytes.
    ///
    /// Returns the line without the terminator and moves past the `\n`.
    /// Returns `None`, leaving the cursor in place, if no terminator exists
    /// within `max_len` bytes or before the end of the buffer.
    pub fn read_line(&mut self, max_len: usize) -> Option<&'a [u8]> {
        let window = self.remaining_bytes();
        let window = &window[..window.len().min(max_len)];

        let end = window.iter().position(|x| *x == b'\n')?;
        self.position += end + 1;

        Some(&window[..end])
    }
}

#[cfg(test)]
mod tests {
    use crate::bytestream::ByteCursor;

    #[test]
    fn failed_reads_do_not_move() {
        let mut cursor = ByteCursor::new(&[1, 2, 3]);

        assert!(cursor.peek_fixed::<4>().is_err());
        assert!(cursor.skip(4).is_err());
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.peek_fixed::<3>().unwrap(), [1, 2, 3]);
        cursor.skip(3).unwrap();
        assert!(cursor.read_u8().is_err());
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn read_slice_overflow() {
        let mut cursor = ByteCursor::new(&[1, 2, 3]);
        cursor.skip(1).unwrap();
        assert!(cursor.read_slice(usize::MAX).is_err());
        assert_eq!(cursor.read_slice(2).unwrap(), &[2, 3]);
    }

    #[test]
    fn lines() {
        let mut cursor = ByteCursor::new(b"abc\r\n\nrest");

        assert_eq!(cursor.read_line(100), Some(&b"abc\r"[..]));
        assert_eq!(cursor.read_line(100), Some(&b""[..]));
        assert_eq!(cursor.read_line(100), None);
        assert_eq!(cursor.remaining_bytes(), b"rest");
    }

    #[test]
    fn line_limit() {
        let mut cursor = ByteCursor::new(b"abcdef\n");
        assert_eq!(cursor.read_line(4), None);
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.read_line(7), Some(&b"abcdef"[..]));
    }
}

/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Channel layout of a decoded source

/// Which of R, G, B and A a source has and where each lives.
///
/// R, G and B are always present, alpha is optional.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ChannelLayout {
    pub r: usize,
    pub g: usize,
    pub b: usize,
    pub a: Option<usize>
}

impl ChannelLayout {
    /// Fixed layout of Radiance files, RGB without alpha
    pub const fn rgb() -> ChannelLayout {
        ChannelLayout {
            r: 0,
            g: 1,
            b: 2,
            a: None
        }
    }

    pub const fn has_alpha(&self) -> bool {
        self.a.is_some()
    }

    /// Number of interleaved channels produced for this layout, 3 or 4
    pub const fn num_channels(&self) -> usize {
        if self.has_alpha() {
            4
        } else {
            3
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::channels::ChannelLayout;

    #[test]
    fn order() {
        let layout = ChannelLayout {
            r: 3,
            g: 2,
            b: 1,
            a: Some(0)
        };
        assert!(layout.has_alpha());
        assert_eq!(layout.num_channels(), 4);
        assert_eq!(ChannelLayout::rgb().num_channels(), 3);
    }
}

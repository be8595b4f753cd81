use std::collections::TryReserveError;

use crate::Coords;
use crate::direction::Direction;

/// Index of a segment inside its chain's arena.
pub type SegmentId = usize;

const HEAD: SegmentId = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub prev_direction: Direction,
    next: Option<SegmentId>,
}

impl Segment {
    pub fn new(pos: Coords, direction: Direction) -> Self {
        Segment { x: pos.0, y: pos.1, direction, prev_direction: direction, next: None }
    }

    pub fn pos(&self) -> Coords {
        (self.x, self.y)
    }
}

/// Head-to-tail sequence of segments. Every segment lives in one arena and
/// links to its successor by index; the chain only grows at the tail and is
/// released as a whole when dropped.
#[derive(Clone, Debug)]
pub struct SegmentChain {
    segments: Vec<Segment>,
    tail: SegmentId,
}

impl SegmentChain {
    pub fn new(head: Segment) -> Result<Self, TryReserveError> {
        let mut segments = Vec::new();
        segments.try_reserve(1)?;
        segments.push(head);
        Ok(SegmentChain { segments, tail: HEAD })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn head(&self) -> &Segment {
        &self.segments[HEAD]
    }

    pub fn tail(&self) -> &Segment {
        &self.segments[self.tail]
    }

    /// Links a new segment behind the current tail.
    pub fn append(&mut self, mut segment: Segment) -> Result<SegmentId, TryReserveError> {
        self.segments.try_reserve(1)?;

        segment.next = None;
        let id = self.segments.len();
        self.segments.push(segment);
        self.segments[self.tail].next = Some(id);
        self.tail = id;

        Ok(id)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { chain: self, cursor: Some(HEAD) }
    }

    /// Visits every segment head to tail, following the links.
    pub fn for_each_mut<F: FnMut(&mut Segment)>(&mut self, mut f: F) {
        let mut cursor = Some(HEAD);
        while let Some(id) = cursor {
            let segment = &mut self.segments[id];
            f(segment);
            cursor = segment.next;
        }
    }

    pub fn contains(&self, pos: Coords) -> bool {
        self.iter().any(|seg| seg.pos() == pos)
    }

    #[cfg(test)]
    pub fn head_mut(&mut self) -> &mut Segment {
        &mut self.segments[HEAD]
    }
}

pub struct Iter<'a> {
    chain: &'a SegmentChain,
    cursor: Option<SegmentId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let segment = &self.chain.segments[self.cursor?];
        self.cursor = segment.next;
        Some(segment)
    }
}

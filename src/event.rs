use crate::model::segment::SegmentList;

/// Events delivered to the app loop from background threads.
#[derive(Debug)]
pub enum AppEvent {
    /// The book finished loading (possibly as the placeholder book).
    SegmentsLoaded(SegmentList),
}

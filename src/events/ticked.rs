use super::TrackEvent;

/// An event paired with its absolute position in a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticked<T> {
    accumulated_ticks: u64,
    event: T,
}

impl<T> Ticked<T> {
    /// Create a new ticked event
    pub const fn new(accumulated_ticks: u64, event: T) -> Self {
        Self {
            accumulated_ticks,
            event,
        }
    }

    /// Ticks since the start of the track
    pub const fn accumulated_ticks(&self) -> u64 {
        self.accumulated_ticks
    }

    /// The wrapped event
    pub const fn event(&self) -> &T {
        &self.event
    }
}

/// Iterator returned from [`Track::ticked_events`](crate::file::Track::ticked_events)
#[derive(Debug, Clone)]
pub struct TickedEvents<'a> {
    accumulated_ticks: u64,
    events: core::slice::Iter<'a, TrackEvent>,
}

impl<'a> TickedEvents<'a> {
    pub(crate) fn new(events: &'a [TrackEvent]) -> Self {
        Self {
            accumulated_ticks: 0,
            events: events.iter(),
        }
    }
}

impl<'a> Iterator for TickedEvents<'a> {
    type Item = Ticked<&'a TrackEvent>;
    fn next(&mut self) -> Option<Self::Item> {
        let event = self.events.next()?;
        self.accumulated_ticks += u64::from(event.delta_ticks());
        Some(Ticked::new(self.accumulated_ticks, event))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}

impl ExactSizeIterator for TickedEvents<'_> {}

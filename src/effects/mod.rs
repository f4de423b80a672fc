pub(crate) mod comet;
pub(crate) mod tail;
pub(crate) mod volume;

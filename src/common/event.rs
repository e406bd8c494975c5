/// Something that happened inside a simulation, stamped with simulation time
/// rather than wall-clock time so replays with the same seed produce identical logs.
pub trait DomainEvent: Send + Sync + Clone {
    fn event_type(&self) -> &'static str;
    fn simulation_id(&self) -> &str;
    /// Index of the step (1-based) during which the event was raised.
    fn step(&self) -> u64;
    /// Simulation time in seconds at the end of that step.
    fn occurred_at(&self) -> f64;
}

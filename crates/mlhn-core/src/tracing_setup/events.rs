//! Structured log events for the training and inference phases.

/// Log the start of a hypernetwork build.
pub fn training_started(records: usize, num_labels: usize, correlation: &str) {
    tracing::info!(
        event = "training_started",
        records = records,
        num_labels = num_labels,
        correlation = %correlation,
        "hypernetwork training started"
    );
}

/// Log one refinement round.
pub fn refinement_iteration(iteration: usize, replaced: usize, accepted: usize, mean_fitness: f64) {
    tracing::debug!(
        event = "refinement_iteration",
        iteration = iteration,
        replaced = replaced,
        accepted = accepted,
        mean_fitness = mean_fitness,
        "refinement iteration"
    );
}

/// Log one weight-training epoch.
pub fn gradient_epoch(epoch: usize, updates: usize, hamming_error: f64) {
    tracing::debug!(
        event = "gradient_epoch",
        epoch = epoch,
        updates = updates,
        hamming_error = hamming_error,
        "weight training epoch"
    );
}

/// Log hyperedges that matched no training record.
pub fn degenerate_edges(count: usize, population: usize) {
    tracing::warn!(
        event = "degenerate_edges",
        count = count,
        population = population,
        "hyperedges matched no training record; fitness set to 0"
    );
}

/// Log completion of a hypernetwork build.
pub fn training_completed(population: usize, mean_fitness: f64, hamming_error: f64) {
    tracing::info!(
        event = "training_completed",
        population = population,
        mean_fitness = mean_fitness,
        hamming_error = hamming_error,
        "hypernetwork training completed"
    );
}

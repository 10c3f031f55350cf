use serde::Serialize;
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GenerationStats {
  pub named_types: usize,
  pub aliases: usize,
  pub anonymous_types: usize,
  pub handlers_converted: usize,
  pub modules: usize,
  pub explicit_assignments: usize,
  pub reachability_assignments: usize,
  pub unassigned_types: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  #[serde(serialize_with = "serialize_warnings")]
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_named_type(&mut self) {
    self.named_types += 1;
  }

  pub fn record_alias(&mut self) {
    self.aliases += 1;
  }

  pub fn record_anonymous_type(&mut self) {
    self.anonymous_types += 1;
  }

  pub fn record_handler(&mut self) {
    self.handlers_converted += 1;
  }

  pub fn record_modules(&mut self, count: usize) {
    self.modules += count;
  }

  pub fn record_explicit_assignment(&mut self) {
    self.explicit_assignments += 1;
  }

  pub fn record_reachability_assignment(&mut self) {
    self.reachability_assignments += 1;
  }

  pub fn record_unassigned(&mut self, count: usize) {
    self.unassigned_types += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  /// Records a non-fatal condition and logs it.
  pub fn record_warning(&mut self, warning: GenerationWarning) {
    tracing::warn!("{warning}");
    self.warnings.push(warning);
  }
}

/// Conditions the build absorbs with a deterministic fallback.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "{location}: {values} enum values but {names} enum names, names ignored")]
  InvalidEnumMetadata {
    location: String,
    values: usize,
    names: usize,
  },
  #[strum(to_string = "{location}: schema has no recognizable shape, treated as unknown")]
  UnsupportedSchema { location: String },
  #[strum(to_string = "Configured type '{type_name}' for module '{module}' does not exist")]
  UnknownConfiguredType { type_name: String, module: String },
}

fn serialize_warnings<S: serde::Serializer>(warnings: &[GenerationWarning], serializer: S) -> Result<S::Ok, S::Error> {
  serializer.collect_seq(warnings.iter().map(ToString::to_string))
}

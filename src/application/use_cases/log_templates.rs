//! Templated messages for the simulated training log.
//!
//! Templates may use `{epoch}`, `{total_epochs}`, `{step}`, `{loss}`,
//! `{accuracy}` and `{progress}` placeholders.

use crate::infrastructure::random::RandomSource;

/// Values available to a message template at render time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MessageContext {
    pub epoch: u32,
    pub total_epochs: u32,
    pub step: u64,
    pub loss: f64,
    pub accuracy: f64,
    pub progress: f64,
}

/// Produces the periodic log lines of a running simulation.
pub trait LogMessageProvider: Send {
    fn next_message(&mut self, ctx: &MessageContext, random: &mut dyn RandomSource) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Uniform pick using the simulator's random source
    Random,
    /// Walk the templates in order, wrapping around
    RoundRobin,
}

const STANDARD_TEMPLATES: &[&str] = &[
    "Step {step}: Training loss decreased to {loss}",
    "Epoch {epoch}/{total_epochs} - step {step}: loss {loss}, accuracy {accuracy}%",
    "Evaluating on validation batch (epoch {epoch})",
    "Gradient norm stable, learning rate schedule on track",
    "Checkpoint saved at {progress}% progress",
    "Processed batch {step} of epoch {epoch}",
];

#[derive(Debug, Clone)]
pub struct MessageTemplates {
    templates: Vec<String>,
    policy: SelectionPolicy,
    cursor: usize,
}

impl MessageTemplates {
    pub fn new(templates: Vec<String>, policy: SelectionPolicy) -> Self {
        Self {
            templates,
            policy,
            cursor: 0,
        }
    }

    /// Built-in epoch-aware templates.
    pub fn standard(policy: SelectionPolicy) -> Self {
        Self::new(
            STANDARD_TEMPLATES.iter().map(|t| t.to_string()).collect(),
            policy,
        )
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn pick(&mut self, random: &mut dyn RandomSource) -> Option<&str> {
        if self.templates.is_empty() {
            return None;
        }
        let index = match self.policy {
            SelectionPolicy::Random => {
                let i = (random.next_f64() * self.templates.len() as f64) as usize;
                i.min(self.templates.len() - 1)
            }
            SelectionPolicy::RoundRobin => {
                let i = self.cursor % self.templates.len();
                self.cursor = self.cursor.wrapping_add(1);
                i
            }
        };
        Some(self.templates[index].as_str())
    }
}

impl LogMessageProvider for MessageTemplates {
    fn next_message(&mut self, ctx: &MessageContext, random: &mut dyn RandomSource) -> String {
        match self.pick(random) {
            Some(template) => render(template, ctx),
            None => format!("Step {}: training in progress", ctx.step),
        }
    }
}

pub fn render(template: &str, ctx: &MessageContext) -> String {
    template
        .replace("{total_epochs}", &ctx.total_epochs.to_string())
        .replace("{epoch}", &ctx.epoch.to_string())
        .replace("{step}", &ctx.step.to_string())
        .replace("{loss}", &format!("{:.4}", ctx.loss))
        .replace("{accuracy}", &format!("{:.1}", ctx.accuracy))
        .replace("{progress}", &format!("{:.0}", ctx.progress))
}

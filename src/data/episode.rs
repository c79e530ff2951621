// ============================================================
// Layer 4 — In-Context Learning Episodes
// ============================================================
// An episode is one ICL prompt:
//
//   context 1:  p p p p p p p p p p      ┐
//   context 2:  p p p p p p p p p p      │ same gravity,
//   ...                                   │ same restitution,
//   context K:  p p p p p p p p p p      │ fresh launch each
//   query:      p p p p p p p p p p      ┘
//
// A model that has learned intuitive physics in context should
// infer gravity and elasticity from the K context sequences and
// use them to continue the query. With K = 0 the model only gets
// the query prefix, which serves as a no-context baseline.
//
// `prompt_tokens` flattens the whole episode into one stream,
// with `None` between trajectories as a separator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::sampler::SamplerConfig;
use crate::domain::error::ParamError;
use crate::domain::params::{PhysicsParams, Point};
use crate::domain::traits::Simulator;
use crate::domain::trajectory::Trajectory;
use crate::data::sequence::generate_sequence;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    pub id:      usize,
    pub params:  PhysicsParams,
    pub context: Vec<Trajectory>,
    pub query:   Trajectory,
}

impl Episode {
    /// Context trajectories then the query, `None` between each pair.
    pub fn prompt_tokens(&self) -> Vec<Option<Point>> {
        let mut tokens = Vec::new();
        for t in self.context.iter().chain(std::iter::once(&self.query)) {
            if !tokens.is_empty() {
                tokens.push(None);
            }
            tokens.extend(t.positions.iter().copied().map(Some));
        }
        tokens
    }

    pub fn trajectory_count(&self) -> usize {
        self.context.len() + 1
    }
}

/// Sample one physics, then `context_len + 1` launches under it.
pub fn build_episode<R: Rng + ?Sized>(
    world:       &impl Simulator,
    cfg:         &SamplerConfig,
    context_len: usize,
    id:          usize,
    rng:         &mut R,
) -> Result<Episode, ParamError> {
    let params  = cfg.sample_params(rng);
    let options = cfg.sequence_options(false);

    let mut context = Vec::with_capacity(context_len);
    for _ in 0..context_len {
        let initial = cfg.sample_initial(rng);
        context.push(generate_sequence(world, &initial, params, options)?);
    }

    let initial = cfg.sample_initial(rng);
    let query   = generate_sequence(world, &initial, params, options)?;

    Ok(Episode { id, params, context, query })
}

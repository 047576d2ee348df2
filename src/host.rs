//! Handle table owning effect instances.
//!
//! A host (or a foreign caller) holds small integer [`EffectId`]s; the table
//! owns the instances. Released slots are reused, newest first.

use std::fmt;

use stemfx_core::{EffectConfig, StereoBuffer, StereoBufferMut};
use stemfx_dsp::{EffectInstance, EffectKind, EffectParams};

use crate::{Error, Result};

/// Opaque handle to an instance owned by an [`EffectHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u32);

impl EffectId {
    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owns every live [`EffectInstance`] and hands out ids for them.
///
/// Creation and release allocate and log; processing through an id does
/// neither.
#[derive(Debug, Default)]
pub struct EffectHost {
    config: EffectConfig,
    slots: Vec<Option<EffectInstance>>,
    free: Vec<u32>,
}

impl EffectHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `config` for grain sizes and delay length of every instance.
    ///
    /// The sample rate passed to [`EffectHost::create`] overrides the one in
    /// `config`.
    pub fn with_config(config: EffectConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            slots: Vec::new(),
            free: Vec::new(),
        })
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Allocate an instance at `sample_rate` and return its id.
    pub fn create(&mut self, kind: EffectKind, sample_rate: u32) -> Result<EffectId> {
        let config = EffectConfig {
            sample_rate,
            ..self.config.clone()
        };
        let instance = EffectInstance::with_config(kind, &config)?;

        let id = match self.free.pop() {
            Some(raw) => {
                self.slots[raw as usize] = Some(instance);
                EffectId(raw)
            }
            None => {
                let raw = u32::try_from(self.slots.len()).map_err(|_| {
                    stemfx_core::Error::InvalidConfig("effect handle table is full".into())
                })?;
                self.slots.push(Some(instance));
                EffectId(raw)
            }
        };

        tracing::debug!("Created effect {} ({})", id, kind.name());
        Ok(id)
    }

    /// Destroy the instance behind `id`. The id becomes unknown.
    pub fn release(&mut self, id: EffectId) -> Result<()> {
        let slot = self
            .slots
            .get_mut(id.slot())
            .ok_or(Error::UnknownEffect(id))?;
        let instance = slot.take().ok_or(Error::UnknownEffect(id))?;

        self.free.push(id.0);
        tracing::debug!("Released effect {} ({})", id, instance.kind().name());
        Ok(())
    }

    pub fn contains(&self, id: EffectId) -> bool {
        matches!(self.slots.get(id.slot()), Some(Some(_)))
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| EffectId(i as u32))
    }

    pub fn get(&self, id: EffectId) -> Result<&EffectInstance> {
        self.slots
            .get(id.slot())
            .and_then(Option::as_ref)
            .ok_or(Error::UnknownEffect(id))
    }

    pub fn get_mut(&mut self, id: EffectId) -> Result<&mut EffectInstance> {
        self.slots
            .get_mut(id.slot())
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownEffect(id))
    }

    pub fn process(
        &mut self,
        id: EffectId,
        begin: usize,
        end: usize,
        input: StereoBuffer<'_>,
        output: StereoBufferMut<'_>,
        params: EffectParams,
    ) -> Result<()> {
        self.get_mut(id)?
            .process(begin, end, input, output, params)
            .map_err(Error::from)
    }

    pub fn process_pitch(
        &mut self,
        id: EffectId,
        begin: usize,
        end: usize,
        input: StereoBuffer<'_>,
        output: StereoBufferMut<'_>,
        pitch_ratio: f32,
    ) -> Result<()> {
        let params = EffectParams::PitchShift { ratio: pitch_ratio };
        self.process(id, begin, end, input, output, params)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn process_delay(
        &mut self,
        id: EffectId,
        begin: usize,
        end: usize,
        input: StereoBuffer<'_>,
        output: StereoBufferMut<'_>,
        delay_seconds: f32,
        feedback: f32,
    ) -> Result<()> {
        let params = EffectParams::Delay {
            seconds: delay_seconds,
            feedback,
        };
        self.process(id, begin, end, input, output, params)
    }

    pub fn reset(&mut self, id: EffectId) -> Result<()> {
        self.get_mut(id)?.reset();
        Ok(())
    }
}

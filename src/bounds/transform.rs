use crate::bounds::{Bounds, BoundsError, RangeBounds};
use crate::geom::{
    DEFAULT_PRECISION, Transform, TransformComponent, TransformComponentKind,
};

// ─────────────────────────────────────────────────────────────────────────────
// TransformBounds
// ─────────────────────────────────────────────────────────────────────────────

/// One constrained slot of a transform chain: the component kind it
/// applies to and an optional bound for that component's value.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformBoundsSlot {
    kind: TransformComponentKind,
    bounds: Option<Bounds>,
}

impl TransformBoundsSlot {
    #[must_use]
    pub const fn new(kind: TransformComponentKind, bounds: Option<Bounds>) -> Self {
        Self { kind, bounds }
    }

    #[must_use]
    pub const fn kind(&self) -> TransformComponentKind {
        self.kind
    }

    #[must_use]
    pub const fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }
}

/// Per-slot bounds aligned index-for-index with a transform chain.
///
/// Translation and scale slots take point-capable bounds (range, rect or
/// line); rotation slots are scalar and take range bounds only. A slot
/// with no bounds leaves that component unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformBounds {
    slots: Vec<TransformBoundsSlot>,
    precision: u32,
}

impl TransformBounds {
    pub fn new(slots: Vec<TransformBoundsSlot>, precision: u32) -> Result<Self, BoundsError> {
        for slot in &slots {
            validate_slot(slot)?;
        }
        Ok(Self { slots, precision })
    }

    /// All-unconstrained bounds over a chain shape.
    #[must_use]
    pub fn unconstrained(shape: &[TransformComponentKind], precision: u32) -> Self {
        Self {
            slots: shape
                .iter()
                .map(|&kind| TransformBoundsSlot::new(kind, None))
                .collect(),
            precision,
        }
    }

    /// All-unconstrained bounds aligned to an existing transform.
    #[must_use]
    pub fn for_transform(transform: &Transform, precision: u32) -> Self {
        Self::unconstrained(&transform.shape(), precision)
    }

    /// Unconstrained bounds over the standard scale-rotate-translate chain.
    #[must_use]
    pub fn srt() -> Self {
        Self::unconstrained(
            &[
                TransformComponentKind::Scale,
                TransformComponentKind::Rotation,
                TransformComponentKind::Translation,
            ],
            DEFAULT_PRECISION,
        )
    }

    #[must_use]
    pub fn slots(&self) -> &[TransformBoundsSlot] {
        &self.slots
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// True when any slot carries a defined bound.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.bounds.as_ref().is_some_and(Bounds::is_defined))
    }

    fn nth_slot_of_kind_mut(
        &mut self,
        kind: TransformComponentKind,
        index: usize,
    ) -> Option<&mut TransformBoundsSlot> {
        self.slots
            .iter_mut()
            .filter(|slot| slot.kind == kind)
            .nth(index)
    }

    fn nth_slot_of_kind(
        &self,
        kind: TransformComponentKind,
        index: usize,
    ) -> Option<&TransformBoundsSlot> {
        self.slots.iter().filter(|slot| slot.kind == kind).nth(index)
    }

    /// Set every translation slot to the same bounds.
    pub fn set_translation(&mut self, bounds: Option<Bounds>) -> Result<(), BoundsError> {
        self.set_kind(TransformComponentKind::Translation, bounds)
    }

    /// Set every rotation slot to the same range bounds.
    pub fn set_rotation(&mut self, bounds: Option<RangeBounds>) {
        let bounds = bounds.map(Bounds::Range);
        for slot in &mut self.slots {
            if slot.kind == TransformComponentKind::Rotation {
                slot.bounds = bounds.clone();
            }
        }
    }

    /// Set every scale slot to the same bounds.
    pub fn set_scale(&mut self, bounds: Option<Bounds>) -> Result<(), BoundsError> {
        self.set_kind(TransformComponentKind::Scale, bounds)
    }

    fn set_kind(
        &mut self,
        kind: TransformComponentKind,
        bounds: Option<Bounds>,
    ) -> Result<(), BoundsError> {
        let slot = TransformBoundsSlot::new(kind, bounds);
        validate_slot(&slot)?;
        for existing in &mut self.slots {
            if existing.kind == kind {
                existing.bounds = slot.bounds.clone();
            }
        }
        Ok(())
    }

    /// Replace the bounds of the `index`th translation slot.
    pub fn update_translation(
        &mut self,
        index: usize,
        bounds: Option<Bounds>,
    ) -> Result<(), BoundsError> {
        self.update_kind(TransformComponentKind::Translation, index, bounds)
    }

    /// Replace the bounds of the `index`th rotation slot.
    pub fn update_rotation(
        &mut self,
        index: usize,
        bounds: Option<RangeBounds>,
    ) -> Result<(), BoundsError> {
        self.update_kind(
            TransformComponentKind::Rotation,
            index,
            bounds.map(Bounds::Range),
        )
    }

    /// Replace the bounds of the `index`th scale slot.
    pub fn update_scale(
        &mut self,
        index: usize,
        bounds: Option<Bounds>,
    ) -> Result<(), BoundsError> {
        self.update_kind(TransformComponentKind::Scale, index, bounds)
    }

    fn update_kind(
        &mut self,
        kind: TransformComponentKind,
        index: usize,
        bounds: Option<Bounds>,
    ) -> Result<(), BoundsError> {
        let slot = TransformBoundsSlot::new(kind, bounds);
        validate_slot(&slot)?;
        match self.nth_slot_of_kind_mut(kind, index) {
            Some(existing) => {
                *existing = slot;
                Ok(())
            }
            None => Err(BoundsError::MissingSlot { kind, index }),
        }
    }

    /// Bounds of the `index`th translation slot, if any.
    #[must_use]
    pub fn translation_bounds(&self, index: usize) -> Option<&Bounds> {
        self.nth_slot_of_kind(TransformComponentKind::Translation, index)?
            .bounds()
    }

    /// Bounds of the `index`th rotation slot, if any.
    #[must_use]
    pub fn rotation_bounds(&self, index: usize) -> Option<&Bounds> {
        self.nth_slot_of_kind(TransformComponentKind::Rotation, index)?
            .bounds()
    }

    /// Bounds of the `index`th scale slot, if any.
    #[must_use]
    pub fn scale_bounds(&self, index: usize) -> Option<&Bounds> {
        self.nth_slot_of_kind(TransformComponentKind::Scale, index)?
            .bounds()
    }

    /// Fail unless the transform's chain holds the same kinds, in the same
    /// order, as these slots.
    pub fn check_shape(&self, transform: &Transform) -> Result<(), BoundsError> {
        let expected: Vec<TransformComponentKind> =
            self.slots.iter().map(TransformBoundsSlot::kind).collect();
        if expected != transform.shape() {
            return Err(BoundsError::TransformShapeMismatch {
                expected: shape_name(&expected),
                got: shape_name(&transform.shape()),
            });
        }
        Ok(())
    }

    /// True when every constrained slot contains its component's value.
    pub fn contains_transform(&self, transform: &Transform) -> Result<bool, BoundsError> {
        self.check_shape(transform)?;
        for (slot, component) in self.slots.iter().zip(transform.components()) {
            let Some(bounds) = slot.bounds() else {
                continue;
            };
            let contained = match *component {
                TransformComponent::Translation(offset) => bounds.contains_point(offset)?,
                TransformComponent::Rotation(angle) => bounds.contains_value(angle)?,
                TransformComponent::Scale(factors) => bounds.contains_point(factors)?,
            };
            if !contained {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Clip each component into its slot's bounds and rebuild the chain.
    pub fn clip_transform(&self, transform: &Transform) -> Result<Transform, BoundsError> {
        self.check_shape(transform)?;
        let mut components = Vec::with_capacity(transform.len());
        for (slot, component) in self.slots.iter().zip(transform.components()) {
            let clipped = match (slot.bounds(), *component) {
                (None, component) => component,
                (Some(bounds), TransformComponent::Translation(offset)) => {
                    TransformComponent::Translation(bounds.clip_point(offset)?)
                }
                (Some(bounds), TransformComponent::Rotation(angle)) => {
                    TransformComponent::Rotation(bounds.clip_value(angle)?)
                }
                (Some(bounds), TransformComponent::Scale(factors)) => {
                    TransformComponent::Scale(bounds.clip_point(factors)?)
                }
            };
            components.push(clipped);
        }
        Ok(Transform::from_components(components))
    }
}

fn validate_slot(slot: &TransformBoundsSlot) -> Result<(), BoundsError> {
    match (slot.kind, slot.bounds()) {
        (_, None) => Ok(()),
        (_, Some(Bounds::Transform(_))) => Err(BoundsError::NestedTransformBounds),
        (TransformComponentKind::Rotation, Some(Bounds::Range(_))) => Ok(()),
        (TransformComponentKind::Rotation, Some(_)) => Err(BoundsError::RotationSlotNotRange),
        (_, Some(_)) => Ok(()),
    }
}

fn shape_name(shape: &[TransformComponentKind]) -> String {
    let names: Vec<String> = shape.iter().map(ToString::to_string).collect();
    names.join(".")
}

//! Static map model.
//!
//! The map is built once from the referee's setup block and never changes
//! afterwards: fields grouped into regions, bidirectional connections, and
//! the priority half that decides simultaneous pick conflicts.
//!
//! Fields live in a flat `Vec` in setup order; all hot-path queries work on
//! slot indices into that `Vec`, with a single id-to-slot map for the
//! protocol boundary.

use std::collections::HashMap;

use super::state::{Owner, TurnSnapshot};

/// Identifier of a field, as assigned by the referee.
pub type FieldId = u32;

/// Identifier of a region, as assigned by the referee.
pub type RegionId = u32;

/// Errors raised while building or querying the map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("unknown field id: {0}")]
    FieldNotFound(FieldId),

    #[error("unknown region id: {0}")]
    RegionNotFound(RegionId),

    #[error("duplicate field id: {0}")]
    DuplicateField(FieldId),

    #[error("duplicate region id: {0}")]
    DuplicateRegion(RegionId),

    #[error("connection references unknown field id: {0}")]
    EdgeEndpointUnknown(FieldId),

    #[error("map has no fields")]
    EmptyMap,
}

/// The half of the field-id space where our picks win simultaneous
/// conflicts. Announced by the referee at the end of the setup block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityHalf {
    Lower,
    Upper,
}

/// A group of fields that grants bonus troops when fully controlled.
#[derive(Debug, Clone)]
pub struct Region {
    pub id: RegionId,
    pub bonus_troops: u32,
    /// Slots of the member fields.
    members: Vec<usize>,
}

impl Region {
    /// Slots of the member fields.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Returns true if every field of the region has the given owner.
    pub fn is_owned_by(&self, snapshot: &TurnSnapshot, owner: Owner) -> bool {
        self.members.iter().all(|&slot| snapshot.owner(slot) == owner)
    }

    /// Fraction of the region's fields held by the given owner.
    pub fn owned_fraction(&self, snapshot: &TurnSnapshot, owner: Owner) -> f64 {
        let held = self
            .members
            .iter()
            .filter(|&&slot| snapshot.owner(slot) == owner)
            .count();
        held as f64 / self.members.len() as f64
    }
}

/// A single field: its id, owning region, and adjacent fields.
#[derive(Debug, Clone)]
pub struct Field {
    pub id: FieldId,
    pub region: RegionId,
    region_idx: usize,
    neighbors: Vec<usize>,
}

/// The immutable game map: fields, regions, adjacency, pick priority.
#[derive(Debug, Clone)]
pub struct MapModel {
    fields: Vec<Field>,
    regions: Vec<Region>,
    index: HashMap<FieldId, usize>,
    priority: PriorityHalf,
    /// Highest field id still counted as the lower half.
    lower_half_max: FieldId,
}

impl MapModel {
    /// Builds and validates the map from the referee's setup data.
    ///
    /// Adjacency is made symmetric here, so downstream code never has to
    /// consider edge direction.
    pub fn build(
        regions: &[(RegionId, u32)],
        fields: &[(FieldId, RegionId)],
        connections: &[(FieldId, FieldId)],
        priority: PriorityHalf,
    ) -> Result<MapModel, MapError> {
        if fields.is_empty() {
            return Err(MapError::EmptyMap);
        }

        let mut region_list: Vec<Region> = Vec::with_capacity(regions.len());
        let mut region_index: HashMap<RegionId, usize> = HashMap::with_capacity(regions.len());
        for &(id, bonus_troops) in regions {
            if region_index.insert(id, region_list.len()).is_some() {
                return Err(MapError::DuplicateRegion(id));
            }
            region_list.push(Region {
                id,
                bonus_troops,
                members: Vec::new(),
            });
        }

        let mut field_list: Vec<Field> = Vec::with_capacity(fields.len());
        let mut index: HashMap<FieldId, usize> = HashMap::with_capacity(fields.len());
        for &(id, region) in fields {
            let region_idx = *region_index
                .get(&region)
                .ok_or(MapError::RegionNotFound(region))?;
            if index.insert(id, field_list.len()).is_some() {
                return Err(MapError::DuplicateField(id));
            }
            region_list[region_idx].members.push(field_list.len());
            field_list.push(Field {
                id,
                region,
                region_idx,
                neighbors: Vec::new(),
            });
        }

        for &(source, target) in connections {
            let source_slot = *index
                .get(&source)
                .ok_or(MapError::EdgeEndpointUnknown(source))?;
            let target_slot = *index
                .get(&target)
                .ok_or(MapError::EdgeEndpointUnknown(target))?;
            if !field_list[source_slot].neighbors.contains(&target_slot) {
                field_list[source_slot].neighbors.push(target_slot);
            }
            if !field_list[target_slot].neighbors.contains(&source_slot) {
                field_list[target_slot].neighbors.push(source_slot);
            }
        }

        let mut sorted_ids: Vec<FieldId> = field_list.iter().map(|f| f.id).collect();
        sorted_ids.sort_unstable();
        let half = sorted_ids.len() / 2;
        let lower_half_max = if half == 0 {
            sorted_ids[0]
        } else {
            sorted_ids[half - 1]
        };

        Ok(MapModel {
            fields: field_list,
            regions: region_list,
            index,
            priority,
            lower_half_max,
        })
    }

    /// Number of fields on the map.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// All fields in setup order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The field at a slot index.
    pub fn field(&self, slot: usize) -> &Field {
        &self.fields[slot]
    }

    /// Resolves a field id to its slot index.
    pub fn slot_of(&self, id: FieldId) -> Result<usize, MapError> {
        self.index.get(&id).copied().ok_or(MapError::FieldNotFound(id))
    }

    /// Looks up a field by its id.
    pub fn field_by_id(&self, id: FieldId) -> Result<&Field, MapError> {
        self.slot_of(id).map(|slot| &self.fields[slot])
    }

    /// Slots adjacent to the field at `slot`.
    pub fn neighbors(&self, slot: usize) -> &[usize] {
        &self.fields[slot].neighbors
    }

    /// Returns true if the two fields share a connection.
    pub fn are_connected(&self, a: FieldId, b: FieldId) -> Result<bool, MapError> {
        let a_slot = self.slot_of(a)?;
        let b_slot = self.slot_of(b)?;
        Ok(self.fields[a_slot].neighbors.contains(&b_slot))
    }

    /// All regions in setup order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The region owning the field at `slot`.
    pub fn region_of(&self, slot: usize) -> &Region {
        &self.regions[self.fields[slot].region_idx]
    }

    /// Looks up a region by its id.
    pub fn region_by_id(&self, id: RegionId) -> Result<&Region, MapError> {
        self.regions
            .iter()
            .find(|r| r.id == id)
            .ok_or(MapError::RegionNotFound(id))
    }

    /// The half of the id space where our picks win conflicts.
    pub fn priority(&self) -> PriorityHalf {
        self.priority
    }

    /// Returns true if the field id lies in our priority half.
    pub fn in_priority_half(&self, id: FieldId) -> bool {
        match self.priority {
            PriorityHalf::Lower => id <= self.lower_half_max,
            PriorityHalf::Upper => id > self.lower_half_max,
        }
    }
}

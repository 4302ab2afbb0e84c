// Copyright 2026 Boundless Foundation, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{
    aggregator::{shares_from_counts, GroupCount},
    shares::Share,
};

/// Counts behind the substitute dataset, shared by every feed.
pub const SUBSTITUTE_COUNTS: &[(&str, u64)] = &[
    ("AGUAS CORDOBESAS S.A.", 45),
    ("HOSPITAL NACIONAL DE CLINICAS", 28),
    ("MUNICIPALIDAD DE CORDOBA", 22),
    ("CLINICA PRIVADA DEL SUR", 15),
    ("UNIVERSIDAD NACIONAL DE CORDOBA", 12),
    ("OTROS SOLICITANTES", 6),
];

/// Substitute rows, with percentages computed the same way live rows are.
pub fn substitute_shares() -> Vec<Share> {
    shares_from_counts(SUBSTITUTE_COUNTS.iter().map(|(key, count)| GroupCount::new(*key, *count)))
}

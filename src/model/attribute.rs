//! Attribute snapshots
//!
//! Positional attributes annotate single tokens, structural attributes
//! annotate regions, alignment attributes link regions across corpora.

use std::ops::RangeInclusive;

use crate::client::Client;
use crate::error::{ProtocolError, Result};
use crate::protocol::{Opcode, Status};

use super::corpus::Corpus;

fn api_name(corpus: &Corpus, name: &str) -> String {
    format!("{}.{}", corpus.api_name, name)
}

// =============================================================================
// Positional
// =============================================================================

/// A positional attribute, e.g. `word` or `pos`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalAttribute {
    pub api_name: String,
    pub name: String,

    /// Number of tokens
    pub size: i32,

    /// Number of distinct values
    pub lexicon_size: i32,
}

impl PositionalAttribute {
    pub fn fetch(client: &mut Client, corpus: &Corpus, name: &str) -> Result<Self> {
        let api_name = api_name(corpus, name);
        let size = client.cl_attribute_size(&api_name)?;
        let lexicon_size = client.cl_lexicon_size(&api_name)?;
        Ok(Self {
            api_name,
            name: name.to_string(),
            size,
            lexicon_size,
        })
    }

    pub fn list(client: &mut Client, corpus: &Corpus) -> Result<Vec<Self>> {
        client
            .corpus_positional_attributes(&corpus.api_name)?
            .iter()
            .map(|name| Self::fetch(client, corpus, name))
            .collect()
    }

    pub fn cpos_by_id(&self, client: &mut Client, id: i32) -> Result<Vec<i32>> {
        client.cl_id2cpos(&self.api_name, id)
    }

    pub fn cpos_by_ids(&self, client: &mut Client, ids: &[i32]) -> Result<Vec<i32>> {
        client.cl_idlist2cpos(&self.api_name, ids)
    }

    pub fn freqs_by_ids(&self, client: &mut Client, ids: &[i32]) -> Result<Vec<i32>> {
        client.cl_id2freq(&self.api_name, ids)
    }

    pub fn ids_by_cpos(&self, client: &mut Client, cpos: &[i32]) -> Result<Vec<i32>> {
        client.cl_cpos2id(&self.api_name, cpos)
    }

    pub fn ids_by_regex(&self, client: &mut Client, regex: &str) -> Result<Vec<i32>> {
        client.cl_regex2id(&self.api_name, regex)
    }

    pub fn ids_by_values<S: AsRef<str>>(&self, client: &mut Client, values: &[S]) -> Result<Vec<i32>> {
        client.cl_str2id(&self.api_name, values)
    }

    pub fn values_by_cpos(&self, client: &mut Client, cpos: &[i32]) -> Result<Vec<String>> {
        client.cl_cpos2str(&self.api_name, cpos)
    }

    pub fn values_by_ids(&self, client: &mut Client, ids: &[i32]) -> Result<Vec<String>> {
        client.cl_id2str(&self.api_name, ids)
    }

    pub fn drop_attribute(&self, client: &mut Client) -> Result<Status> {
        client.cl_drop_attribute(&self.api_name)
    }
}

// =============================================================================
// Structural
// =============================================================================

/// A structural attribute, e.g. `s` or `text_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralAttribute {
    pub api_name: String,
    pub name: String,

    /// Number of regions
    pub size: i32,

    /// Whether regions carry annotated values
    pub has_values: bool,
}

impl StructuralAttribute {
    pub fn fetch(client: &mut Client, corpus: &Corpus, name: &str) -> Result<Self> {
        let api_name = api_name(corpus, name);
        let size = client.cl_attribute_size(&api_name)?;
        let has_values = client.corpus_structural_attribute_has_values(&api_name)?;
        Ok(Self {
            api_name,
            name: name.to_string(),
            size,
            has_values,
        })
    }

    /// List structural attributes.
    ///
    /// With `part_of`, only attributes named `<part_of>_<something>` are
    /// kept, e.g. `text_id` and `text_title` for `text`.
    pub fn list(client: &mut Client, corpus: &Corpus, part_of: Option<&str>) -> Result<Vec<Self>> {
        let prefix = part_of.map(|parent| format!("{}_", parent));
        client
            .corpus_structural_attributes(&corpus.api_name)?
            .iter()
            .filter(|name| prefix.as_deref().map_or(true, |p| name.starts_with(p)))
            .map(|name| Self::fetch(client, corpus, name))
            .collect()
    }

    /// `(start, end)` corpus positions of a region
    pub fn cpos_by_id(&self, client: &mut Client, id: i32) -> Result<(i32, i32)> {
        client.cl_struc2cpos(&self.api_name, id)
    }

    pub fn ids_by_cpos(&self, client: &mut Client, cpos: &[i32]) -> Result<Vec<i32>> {
        client.cl_cpos2struc(&self.api_name, cpos)
    }

    pub fn lbound_by_cpos(&self, client: &mut Client, cpos: &[i32]) -> Result<Vec<i32>> {
        client.cl_cpos2lbound(&self.api_name, cpos)
    }

    pub fn rbound_by_cpos(&self, client: &mut Client, cpos: &[i32]) -> Result<Vec<i32>> {
        client.cl_cpos2rbound(&self.api_name, cpos)
    }

    pub fn values_by_ids(&self, client: &mut Client, ids: &[i32]) -> Result<Vec<String>> {
        client.cl_struc2str(&self.api_name, ids)
    }

    /// Widen the span `first_cpos..=last_cpos` by `context` regions on
    /// each side.
    ///
    /// The left context starts at the first token of the region `context`
    /// regions before the one holding `first_cpos`, the right context ends
    /// at the last token of the region `context` regions after the one
    /// holding `last_cpos`. A side is `None` when it adds no tokens.
    pub fn context(
        &self,
        client: &mut Client,
        corpus: &Corpus,
        first_cpos: i32,
        last_cpos: i32,
        context: i32,
    ) -> Result<RegionContext> {
        let mut window = RegionContext {
            left: None,
            matched: (first_cpos, last_cpos),
            right: None,
        };
        if context <= 0 {
            return Ok(window);
        }

        let ids = self.ids_by_cpos(client, &[first_cpos, last_cpos])?;
        let (first_id, last_id) = match ids[..] {
            [first, last] => (first, last),
            _ => {
                return Err(ProtocolError::UnexpectedResponse {
                    opcode: Opcode::ClCpos2Struc.name(),
                    expected: "2 region numbers",
                    actual: format!("{} region numbers", ids.len()),
                }
                .into())
            }
        };

        let (left_start, _) = self.cpos_by_id(client, (first_id - context).max(0))?;
        if left_start != first_cpos {
            window.left = Some((left_start, (first_cpos - 1).max(0)));
        }

        let (_, right_end) = self.cpos_by_id(client, (last_id + context).min(self.size - 1))?;
        if right_end != last_cpos {
            window.right = Some(((last_cpos + 1).min(corpus.size - 1), right_end));
        }

        Ok(window)
    }

    pub fn drop_attribute(&self, client: &mut Client) -> Result<Status> {
        client.cl_drop_attribute(&self.api_name)
    }
}

/// A span of corpus positions with its surrounding region context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionContext {
    /// `(start, end)` of the left context
    pub left: Option<(i32, i32)>,

    /// `(start, end)` of the span itself
    pub matched: (i32, i32),

    /// `(start, end)` of the right context
    pub right: Option<(i32, i32)>,
}

impl RegionContext {
    /// Every corpus position from the start of the left context to the end
    /// of the right one
    pub fn cpos(&self) -> RangeInclusive<i32> {
        let start = self.left.map_or(self.matched.0, |(start, _)| start);
        let end = self.right.map_or(self.matched.1, |(_, end)| end);
        start..=end
    }
}

// =============================================================================
// Alignment
// =============================================================================

/// An alignment attribute linking this corpus to another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentAttribute {
    pub api_name: String,
    pub name: String,

    /// Number of alignments
    pub size: i32,
}

impl AlignmentAttribute {
    pub fn fetch(client: &mut Client, corpus: &Corpus, name: &str) -> Result<Self> {
        let api_name = api_name(corpus, name);
        let size = client.cl_attribute_size(&api_name)?;
        Ok(Self {
            api_name,
            name: name.to_string(),
            size,
        })
    }

    pub fn list(client: &mut Client, corpus: &Corpus) -> Result<Vec<Self>> {
        client
            .corpus_alignment_attributes(&corpus.api_name)?
            .iter()
            .map(|name| Self::fetch(client, corpus, name))
            .collect()
    }

    /// `(src_start, src_end, target_start, target_end)` of an alignment
    pub fn cpos_by_id(&self, client: &mut Client, id: i32) -> Result<(i32, i32, i32, i32)> {
        client.cl_alg2cpos(&self.api_name, id)
    }

    pub fn ids_by_cpos(&self, client: &mut Client, cpos: &[i32]) -> Result<Vec<i32>> {
        client.cl_cpos2alg(&self.api_name, cpos)
    }

    pub fn drop_attribute(&self, client: &mut Client) -> Result<Status> {
        client.cl_drop_attribute(&self.api_name)
    }
}

//! Subcorpus snapshots

use crate::client::Client;
use crate::error::Result;
use crate::protocol::{Field, Status};

use super::attribute::PositionalAttribute;
use super::corpus::Corpus;

/// A named query result stored on the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcorpus {
    /// `<CORPUS>:<name>`
    pub api_name: String,

    pub name: String,

    /// Number of matches
    pub size: i32,

    /// Fields the matches carry, in `Field::ALL` order
    pub fields: Vec<Field>,
}

impl Subcorpus {
    pub fn fetch(client: &mut Client, corpus: &Corpus, name: &str) -> Result<Self> {
        let api_name = format!("{}:{}", corpus.api_name, name);

        let mut fields = Vec::new();
        for field in Field::ALL {
            if client.cqp_subcorpus_has_field(&api_name, field)? {
                fields.push(field);
            }
        }
        let size = client.cqp_subcorpus_size(&api_name)?;

        Ok(Self {
            api_name,
            name: name.to_string(),
            size,
            fields,
        })
    }

    pub fn list(client: &mut Client, corpus: &Corpus) -> Result<Vec<Self>> {
        client
            .cqp_list_subcorpora(&corpus.api_name)?
            .iter()
            .map(|name| Self::fetch(client, corpus, name))
            .collect()
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Values of `field` for matches `first..=last`
    pub fn dump(&self, client: &mut Client, field: Field, first: i32, last: i32) -> Result<Vec<i32>> {
        client.cqp_dump_subcorpus(&self.api_name, field, first, last)
    }

    pub fn drop_subcorpus(&self, client: &mut Client) -> Result<Status> {
        client.cqp_drop_subcorpus(&self.api_name)
    }

    /// `(id, frequency)` pairs, most frequent first
    pub fn fdist_1(
        &self,
        client: &mut Client,
        cutoff: i32,
        field: Field,
        attribute: &PositionalAttribute,
    ) -> Result<Vec<(i32, i32)>> {
        let flat = client.cqp_fdist_1(&self.api_name, cutoff, field, &attribute.api_name)?;
        Ok(flat.chunks_exact(2).map(|c| (c[0], c[1])).collect())
    }

    /// `(id1, id2, frequency)` triples, most frequent first
    pub fn fdist_2(
        &self,
        client: &mut Client,
        cutoff: i32,
        field1: Field,
        attribute1: &PositionalAttribute,
        field2: Field,
        attribute2: &PositionalAttribute,
    ) -> Result<Vec<(i32, i32, i32)>> {
        let flat = client.cqp_fdist_2(
            &self.api_name,
            cutoff,
            field1,
            &attribute1.api_name,
            field2,
            &attribute2.api_name,
        )?;
        Ok(flat.chunks_exact(3).map(|c| (c[0], c[1], c[2])).collect())
    }
}

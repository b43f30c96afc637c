//! Corpus snapshots

use crate::client::Client;
use crate::error::Result;
use crate::protocol::Status;

use super::attribute::{AlignmentAttribute, PositionalAttribute, StructuralAttribute};
use super::subcorpus::Subcorpus;

/// A corpus as seen at fetch time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    /// Name used in protocol calls
    pub api_name: String,

    pub name: String,

    /// Number of tokens
    pub size: i32,

    pub charset: String,

    pub properties: Vec<String>,
}

impl Corpus {
    /// Fetch a snapshot of one corpus
    pub fn fetch(client: &mut Client, corpus_name: &str) -> Result<Self> {
        let charset = client.corpus_charset(corpus_name)?;
        let properties = client.corpus_properties(corpus_name)?;
        let size = client.cl_attribute_size(&format!("{}.word", corpus_name))?;
        Ok(Self {
            api_name: corpus_name.to_string(),
            name: corpus_name.to_string(),
            size,
            charset,
            properties,
        })
    }

    /// Fetch snapshots of every corpus the server offers
    pub fn list(client: &mut Client) -> Result<Vec<Self>> {
        client
            .corpus_list_corpora()?
            .iter()
            .map(|name| Self::fetch(client, name))
            .collect()
    }

    /// Full name from the registry entry
    pub fn full_name(&self, client: &mut Client) -> Result<String> {
        client.corpus_full_name(&self.api_name)
    }

    /// Lines of the `.info` file
    pub fn info(&self, client: &mut Client) -> Result<Vec<String>> {
        client.corpus_info(&self.api_name)
    }

    pub fn positional_attributes(&self, client: &mut Client) -> Result<Vec<PositionalAttribute>> {
        PositionalAttribute::list(client, self)
    }

    pub fn positional_attribute(&self, client: &mut Client, name: &str) -> Result<PositionalAttribute> {
        PositionalAttribute::fetch(client, self, name)
    }

    pub fn structural_attributes(&self, client: &mut Client) -> Result<Vec<StructuralAttribute>> {
        StructuralAttribute::list(client, self, None)
    }

    pub fn structural_attribute(&self, client: &mut Client, name: &str) -> Result<StructuralAttribute> {
        StructuralAttribute::fetch(client, self, name)
    }

    pub fn alignment_attributes(&self, client: &mut Client) -> Result<Vec<AlignmentAttribute>> {
        AlignmentAttribute::list(client, self)
    }

    pub fn alignment_attribute(&self, client: &mut Client, name: &str) -> Result<AlignmentAttribute> {
        AlignmentAttribute::fetch(client, self, name)
    }

    pub fn subcorpora(&self, client: &mut Client) -> Result<Vec<Subcorpus>> {
        Subcorpus::list(client, self)
    }

    pub fn subcorpus(&self, client: &mut Client, name: &str) -> Result<Subcorpus> {
        Subcorpus::fetch(client, self, name)
    }

    /// Run a query and fetch the resulting subcorpus
    pub fn query(&self, client: &mut Client, subcorpus_name: &str, query: &str) -> Result<Subcorpus> {
        client.cqp_query(&self.api_name, subcorpus_name, query)?;
        Subcorpus::fetch(client, self, subcorpus_name)
    }

    /// Unload the corpus from server memory
    pub fn drop_corpus(&self, client: &mut Client) -> Result<Status> {
        client.corpus_drop_corpus(&self.api_name)
    }
}

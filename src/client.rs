//! Client Module
//!
//! The call dispatcher: one typed method per protocol operation.
//!
//! ## Call sequence
//! 1. Encode the opcode and the arguments in declared order
//! 2. Send the request in one write
//! 3. Block for exactly one response and classify it
//! 4. Convert it to the operation's result type
//!
//! ## Concurrency
//! A `Client` owns its socket and takes `&mut self` for every call, so a
//! second request can never be issued while a response is pending. Sharing
//! one client between threads needs external locking (e.g. a `Mutex`).
//!
//! ## Failure handling
//! Transport and protocol failures leave the byte stream in an unknown
//! position, so the socket is dropped and later calls fail with
//! [`CqiError::NotConnected`] until [`Client::connect`] is called again.
//! Server errors are complete responses; the connection stays usable.
//! Nothing is retried.

use crate::config::Config;
use crate::error::{CqiError, Result};
use crate::network::Transport;
use crate::protocol::{read_response, Field, FromValue, Opcode, Request, Response, Status};

/// A client for one CQi server
pub struct Client {
    /// Client configuration
    config: Config,

    /// Open connection, if any
    transport: Option<Transport>,
}

impl Client {
    /// Create a client; no connection is made yet
    pub fn new(config: Config) -> Self {
        Self {
            config,
            transport: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.transport.as_ref().is_some_and(Transport::is_open)
    }

    /// Connect with the credentials from the configuration
    pub fn connect(&mut self) -> Result<Status> {
        let username = self.config.username.clone();
        let password = self.config.password.clone();
        self.ctrl_connect(&username, &password)
    }

    /// Say goodbye and close the connection
    pub fn disconnect(&mut self) -> Result<Status> {
        self.ctrl_bye()
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Send one request and read its response.
    fn call(&mut self, request: Request) -> Result<Response> {
        let opcode = request.opcode();
        let transport = self.transport.as_mut().ok_or(CqiError::NotConnected)?;
        tracing::trace!("Calling {}", opcode);

        let result = transport
            .send_all(request.as_bytes())
            .and_then(|()| read_response(transport));
        self.settle(opcode, result)
    }

    fn call_status(&mut self, request: Request, expected: Status) -> Result<Status> {
        let opcode = request.opcode();
        let result = self.call(request)?.expect_status(opcode, expected);
        self.settle(opcode, result)
    }

    fn call_data<T: FromValue>(&mut self, request: Request) -> Result<T> {
        let opcode = request.opcode();
        let result = self.call(request)?.expect_data(opcode);
        self.settle(opcode, result)
    }

    /// Drop the connection if `result` left the byte stream in an unknown state
    fn settle<T>(&mut self, opcode: Opcode, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_fatal() && self.transport.is_some() {
                tracing::warn!("{} failed, closing connection: {}", opcode, e);
                self.drop_connection();
            }
        }
        result
    }

    fn drop_connection(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close();
        }
    }

    // =========================================================================
    // Control
    // =========================================================================

    /// Open the socket (if needed) and log in.
    ///
    /// If the server rejects the login the socket is closed again.
    pub fn ctrl_connect(&mut self, username: &str, password: &str) -> Result<Status> {
        let request = Request::new(Opcode::CtrlConnect)
            .string(username)?
            .string(password)?;

        if self.transport.is_none() {
            self.transport = Some(Transport::connect(&self.config)?);
        }

        let result = self.call_status(request, Status::ConnectOk);
        match &result {
            Ok(_) => tracing::info!(
                "Logged in to {} as {} (CQi {})",
                self.config.addr(),
                username,
                self.config.version
            ),
            Err(_) => self.drop_connection(),
        }
        result
    }

    /// Log out; the socket is closed whatever the server answers
    pub fn ctrl_bye(&mut self) -> Result<Status> {
        let result = self.call_status(Request::new(Opcode::CtrlBye), Status::ByeOk);
        self.drop_connection();
        result
    }

    /// Ask the server to abort the running operation.
    ///
    /// No response is read. This does not interrupt a call that is already
    /// waiting for its response.
    pub fn ctrl_user_abort(&mut self) -> Result<()> {
        let transport = self.transport.as_mut().ok_or(CqiError::NotConnected)?;
        transport.send_all(Request::new(Opcode::CtrlUserAbort).as_bytes())
    }

    pub fn ctrl_ping(&mut self) -> Result<Status> {
        self.call_status(Request::new(Opcode::CtrlPing), Status::PingOk)
    }

    /// Full text of the last general error reported by the server
    pub fn ctrl_last_general_error(&mut self) -> Result<String> {
        self.call_data(Request::new(Opcode::CtrlLastGeneralError))
    }

    // =========================================================================
    // Feature queries
    // =========================================================================

    pub fn ask_feature_cqi_1_0(&mut self) -> Result<bool> {
        self.call_data(Request::new(Opcode::AskFeatureCqi10))
    }

    pub fn ask_feature_cl_2_3(&mut self) -> Result<bool> {
        self.call_data(Request::new(Opcode::AskFeatureCl23))
    }

    pub fn ask_feature_cqp_2_3(&mut self) -> Result<bool> {
        self.call_data(Request::new(Opcode::AskFeatureCqp23))
    }

    // =========================================================================
    // Corpus introspection
    // =========================================================================

    pub fn corpus_list_corpora(&mut self) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::CorpusListCorpora))
    }

    pub fn corpus_charset(&mut self, corpus: &str) -> Result<String> {
        self.call_data(Request::new(Opcode::CorpusCharset).string(corpus)?)
    }

    pub fn corpus_properties(&mut self, corpus: &str) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::CorpusProperties).string(corpus)?)
    }

    pub fn corpus_positional_attributes(&mut self, corpus: &str) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::CorpusPositionalAttributes).string(corpus)?)
    }

    pub fn corpus_structural_attributes(&mut self, corpus: &str) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::CorpusStructuralAttributes).string(corpus)?)
    }

    pub fn corpus_structural_attribute_has_values(&mut self, attribute: &str) -> Result<bool> {
        self.call_data(Request::new(Opcode::CorpusStructuralAttributeHasValues).string(attribute)?)
    }

    pub fn corpus_alignment_attributes(&mut self, corpus: &str) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::CorpusAlignmentAttributes).string(corpus)?)
    }

    /// Full name of the corpus from its registry entry
    pub fn corpus_full_name(&mut self, corpus: &str) -> Result<String> {
        self.call_data(Request::new(Opcode::CorpusFullName).string(corpus)?)
    }

    /// Lines of the corpus `.info` file
    pub fn corpus_info(&mut self, corpus: &str) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::CorpusInfo).string(corpus)?)
    }

    /// Unload a corpus and all its attributes from server memory
    pub fn corpus_drop_corpus(&mut self, corpus: &str) -> Result<Status> {
        self.call_status(Request::new(Opcode::CorpusDropCorpus).string(corpus)?, Status::Ok)
    }

    // =========================================================================
    // Attribute access
    // =========================================================================

    /// Number of tokens (positional), regions (structural) or alignments
    pub fn cl_attribute_size(&mut self, attribute: &str) -> Result<i32> {
        self.call_data(Request::new(Opcode::ClAttributeSize).string(attribute)?)
    }

    /// Number of lexicon entries; valid ids are `0..lexicon_size`
    pub fn cl_lexicon_size(&mut self, attribute: &str) -> Result<i32> {
        self.call_data(Request::new(Opcode::ClLexiconSize).string(attribute)?)
    }

    pub fn cl_drop_attribute(&mut self, attribute: &str) -> Result<Status> {
        self.call_status(Request::new(Opcode::ClDropAttribute).string(attribute)?, Status::Ok)
    }

    // Scalar lookups applied element-wise: the result has exactly as many
    // entries as the input.

    /// Lexicon ids of `strings`; -1 for strings not in the lexicon
    pub fn cl_str2id<S: AsRef<str>>(&mut self, attribute: &str, strings: &[S]) -> Result<Vec<i32>> {
        self.call_data(
            Request::new(Opcode::ClStr2Id)
                .string(attribute)?
                .string_list(strings)?,
        )
    }

    /// Strings of lexicon ids; "" for ids out of range
    pub fn cl_id2str(&mut self, attribute: &str, ids: &[i32]) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::ClId2Str).string(attribute)?.int_list(ids)?)
    }

    /// Corpus frequencies of lexicon ids; 0 for ids out of range
    pub fn cl_id2freq(&mut self, attribute: &str, ids: &[i32]) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClId2Freq).string(attribute)?.int_list(ids)?)
    }

    /// Lexicon ids at corpus positions; -1 for positions out of range
    pub fn cl_cpos2id(&mut self, attribute: &str, cpos: &[i32]) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClCpos2Id).string(attribute)?.int_list(cpos)?)
    }

    /// Strings at corpus positions; "" for positions out of range
    pub fn cl_cpos2str(&mut self, attribute: &str, cpos: &[i32]) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::ClCpos2Str).string(attribute)?.int_list(cpos)?)
    }

    /// Region numbers at corpus positions; -1 outside any region
    pub fn cl_cpos2struc(&mut self, attribute: &str, cpos: &[i32]) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClCpos2Struc).string(attribute)?.int_list(cpos)?)
    }

    /// Left boundary of the enclosing region; -1 outside any region
    pub fn cl_cpos2lbound(&mut self, attribute: &str, cpos: &[i32]) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClCpos2LBound).string(attribute)?.int_list(cpos)?)
    }

    /// Right boundary of the enclosing region; -1 outside any region
    pub fn cl_cpos2rbound(&mut self, attribute: &str, cpos: &[i32]) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClCpos2RBound).string(attribute)?.int_list(cpos)?)
    }

    /// Alignment numbers at corpus positions; -1 outside any alignment
    pub fn cl_cpos2alg(&mut self, attribute: &str, cpos: &[i32]) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClCpos2Alg).string(attribute)?.int_list(cpos)?)
    }

    /// Annotated values of regions; "" for regions out of range.
    ///
    /// Only meaningful if the attribute has values, see
    /// [`Client::corpus_structural_attribute_has_values`].
    pub fn cl_struc2str(&mut self, attribute: &str, strucs: &[i32]) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::ClStruc2Str).string(attribute)?.int_list(strucs)?)
    }

    // One argument in, arbitrarily many values out.

    /// All corpus positions of a lexicon id
    pub fn cl_id2cpos(&mut self, attribute: &str, id: i32) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClId2Cpos).string(attribute)?.int(id))
    }

    /// All corpus positions of any of the ids, sorted as a whole
    pub fn cl_idlist2cpos(&mut self, attribute: &str, ids: &[i32]) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClIdList2Cpos).string(attribute)?.int_list(ids)?)
    }

    /// Lexicon ids of all entries matching `regex`; may be empty
    pub fn cl_regex2id(&mut self, attribute: &str, regex: &str) -> Result<Vec<i32>> {
        self.call_data(Request::new(Opcode::ClRegex2Id).string(attribute)?.string(regex)?)
    }

    /// `(start, end)` corpus positions of a region
    pub fn cl_struc2cpos(&mut self, attribute: &str, struc: i32) -> Result<(i32, i32)> {
        self.call_data(Request::new(Opcode::ClStruc2Cpos).string(attribute)?.int(struc))
    }

    /// `(src_start, src_end, target_start, target_end)` of an alignment
    pub fn cl_alg2cpos(&mut self, attribute: &str, alg: i32) -> Result<(i32, i32, i32, i32)> {
        self.call_data(Request::new(Opcode::ClAlg2Cpos).string(attribute)?.int(alg))
    }

    // =========================================================================
    // Queries and subcorpora
    // =========================================================================

    /// Run `query` on `mother_corpus` and store the result as `subcorpus_name`.
    ///
    /// The query must include its terminating `;`.
    pub fn cqp_query(&mut self, mother_corpus: &str, subcorpus_name: &str, query: &str) -> Result<Status> {
        let request = Request::new(Opcode::CqpQuery)
            .string(mother_corpus)?
            .string(subcorpus_name)?
            .string(query)?;
        self.call_status(request, Status::Ok)
    }

    pub fn cqp_list_subcorpora(&mut self, corpus: &str) -> Result<Vec<String>> {
        self.call_data(Request::new(Opcode::CqpListSubcorpora).string(corpus)?)
    }

    pub fn cqp_subcorpus_size(&mut self, subcorpus: &str) -> Result<i32> {
        self.call_data(Request::new(Opcode::CqpSubcorpusSize).string(subcorpus)?)
    }

    pub fn cqp_subcorpus_has_field(&mut self, subcorpus: &str, field: Field) -> Result<bool> {
        self.call_data(Request::new(Opcode::CqpSubcorpusHasField).string(subcorpus)?.field(field))
    }

    /// Values of `field` for the matches `first..=last`
    pub fn cqp_dump_subcorpus(&mut self, subcorpus: &str, field: Field, first: i32, last: i32) -> Result<Vec<i32>> {
        let request = Request::new(Opcode::CqpDumpSubcorpus)
            .string(subcorpus)?
            .field(field)
            .int(first)
            .int(last);
        self.call_data(request)
    }

    /// Delete a subcorpus from server memory
    pub fn cqp_drop_subcorpus(&mut self, subcorpus: &str) -> Result<Status> {
        self.call_status(Request::new(Opcode::CqpDropSubcorpus).string(subcorpus)?, Status::Ok)
    }

    /// Frequency distribution of single tokens.
    ///
    /// Returns up to `cutoff` `(id, frequency)` pairs flattened into one
    /// list, sorted by frequency descending.
    pub fn cqp_fdist_1(&mut self, subcorpus: &str, cutoff: i32, field: Field, attribute: &str) -> Result<Vec<i32>> {
        let request = Request::new(Opcode::CqpFdist1)
            .string(subcorpus)?
            .int(cutoff)
            .field(field)
            .string(attribute)?;
        self.call_data(request)
    }

    /// Frequency distribution of token pairs.
    ///
    /// Returns `(id1, id2, frequency)` triples flattened into one list,
    /// sorted by frequency descending.
    pub fn cqp_fdist_2(
        &mut self,
        subcorpus: &str,
        cutoff: i32,
        field1: Field,
        attribute1: &str,
        field2: Field,
        attribute2: &str,
    ) -> Result<Vec<i32>> {
        let request = Request::new(Opcode::CqpFdist2)
            .string(subcorpus)?
            .int(cutoff)
            .field(field1)
            .string(attribute1)?
            .field(field2)
            .string(attribute2)?;
        self.call_data(request)
    }
}

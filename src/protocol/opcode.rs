//! Opcode definitions
//!
//! One opcode per remote operation. The high byte groups operations into
//! families (0x11 control, 0x12 feature queries, 0x13 corpus, 0x14 CL,
//! 0x15 CQP).

/// Request opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Opcode {
    // Control
    CtrlConnect = 0x1101,
    CtrlBye = 0x1102,
    CtrlUserAbort = 0x1103,
    CtrlPing = 0x1104,
    CtrlLastGeneralError = 0x1105,

    // Feature queries
    AskFeatureCqi10 = 0x1201,
    AskFeatureCl23 = 0x1202,
    AskFeatureCqp23 = 0x1203,

    // Corpus introspection
    CorpusListCorpora = 0x1301,
    CorpusCharset = 0x1303,
    CorpusProperties = 0x1304,
    CorpusPositionalAttributes = 0x1305,
    CorpusStructuralAttributes = 0x1306,
    CorpusStructuralAttributeHasValues = 0x1307,
    CorpusAlignmentAttributes = 0x1308,
    CorpusFullName = 0x1309,
    CorpusInfo = 0x130D,
    CorpusDropCorpus = 0x130F,

    // Corpus library (attribute access)
    ClAttributeSize = 0x1401,
    ClLexiconSize = 0x1402,
    ClDropAttribute = 0x1403,
    ClStr2Id = 0x1404,
    ClId2Str = 0x1405,
    ClId2Freq = 0x1406,
    ClCpos2Id = 0x1407,
    ClCpos2Str = 0x1408,
    ClCpos2Struc = 0x1409,
    ClCpos2Alg = 0x140A,
    ClStruc2Str = 0x140B,
    ClId2Cpos = 0x140C,
    ClIdList2Cpos = 0x140D,
    ClRegex2Id = 0x140E,
    ClStruc2Cpos = 0x140F,
    ClAlg2Cpos = 0x1410,
    ClCpos2LBound = 0x1420,
    ClCpos2RBound = 0x1421,

    // Query processor
    CqpQuery = 0x1501,
    CqpListSubcorpora = 0x1502,
    CqpSubcorpusSize = 0x1503,
    CqpSubcorpusHasField = 0x1504,
    CqpDumpSubcorpus = 0x1505,
    CqpDropSubcorpus = 0x1509,
    CqpFdist1 = 0x1510,
    CqpFdist2 = 0x1511,
}

impl Opcode {
    /// Wire value
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Protocol name of the operation, as used in logs and error messages
    pub fn name(self) -> &'static str {
        match self {
            Opcode::CtrlConnect => "CQI_CTRL_CONNECT",
            Opcode::CtrlBye => "CQI_CTRL_BYE",
            Opcode::CtrlUserAbort => "CQI_CTRL_USER_ABORT",
            Opcode::CtrlPing => "CQI_CTRL_PING",
            Opcode::CtrlLastGeneralError => "CQI_CTRL_LAST_GENERAL_ERROR",
            Opcode::AskFeatureCqi10 => "CQI_ASK_FEATURE_CQI_1_0",
            Opcode::AskFeatureCl23 => "CQI_ASK_FEATURE_CL_2_3",
            Opcode::AskFeatureCqp23 => "CQI_ASK_FEATURE_CQP_2_3",
            Opcode::CorpusListCorpora => "CQI_CORPUS_LIST_CORPORA",
            Opcode::CorpusCharset => "CQI_CORPUS_CHARSET",
            Opcode::CorpusProperties => "CQI_CORPUS_PROPERTIES",
            Opcode::CorpusPositionalAttributes => "CQI_CORPUS_POSITIONAL_ATTRIBUTES",
            Opcode::CorpusStructuralAttributes => "CQI_CORPUS_STRUCTURAL_ATTRIBUTES",
            Opcode::CorpusStructuralAttributeHasValues => {
                "CQI_CORPUS_STRUCTURAL_ATTRIBUTE_HAS_VALUES"
            }
            Opcode::CorpusAlignmentAttributes => "CQI_CORPUS_ALIGNMENT_ATTRIBUTES",
            Opcode::CorpusFullName => "CQI_CORPUS_FULL_NAME",
            Opcode::CorpusInfo => "CQI_CORPUS_INFO",
            Opcode::CorpusDropCorpus => "CQI_CORPUS_DROP_CORPUS",
            Opcode::ClAttributeSize => "CQI_CL_ATTRIBUTE_SIZE",
            Opcode::ClLexiconSize => "CQI_CL_LEXICON_SIZE",
            Opcode::ClDropAttribute => "CQI_CL_DROP_ATTRIBUTE",
            Opcode::ClStr2Id => "CQI_CL_STR2ID",
            Opcode::ClId2Str => "CQI_CL_ID2STR",
            Opcode::ClId2Freq => "CQI_CL_ID2FREQ",
            Opcode::ClCpos2Id => "CQI_CL_CPOS2ID",
            Opcode::ClCpos2Str => "CQI_CL_CPOS2STR",
            Opcode::ClCpos2Struc => "CQI_CL_CPOS2STRUC",
            Opcode::ClCpos2Alg => "CQI_CL_CPOS2ALG",
            Opcode::ClStruc2Str => "CQI_CL_STRUC2STR",
            Opcode::ClId2Cpos => "CQI_CL_ID2CPOS",
            Opcode::ClIdList2Cpos => "CQI_CL_IDLIST2CPOS",
            Opcode::ClRegex2Id => "CQI_CL_REGEX2ID",
            Opcode::ClStruc2Cpos => "CQI_CL_STRUC2CPOS",
            Opcode::ClAlg2Cpos => "CQI_CL_ALG2CPOS",
            Opcode::ClCpos2LBound => "CQI_CL_CPOS2LBOUND",
            Opcode::ClCpos2RBound => "CQI_CL_CPOS2RBOUND",
            Opcode::CqpQuery => "CQI_CQP_QUERY",
            Opcode::CqpListSubcorpora => "CQI_CQP_LIST_SUBCORPORA",
            Opcode::CqpSubcorpusSize => "CQI_CQP_SUBCORPUS_SIZE",
            Opcode::CqpSubcorpusHasField => "CQI_CQP_SUBCORPUS_HAS_FIELD",
            Opcode::CqpDumpSubcorpus => "CQI_CQP_DUMP_SUBCORPUS",
            Opcode::CqpDropSubcorpus => "CQI_CQP_DROP_SUBCORPUS",
            Opcode::CqpFdist1 => "CQI_CQP_FDIST_1",
            Opcode::CqpFdist2 => "CQI_CQP_FDIST_2",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Subcorpus fields, sent as a BYTE argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Field {
    Target = 0x00,
    Keyword = 0x09,
    Match = 0x10,
    MatchEnd = 0x11,
}

impl Field {
    /// All fields, in the order subcorpus snapshots probe them
    pub const ALL: [Field; 4] = [Field::Match, Field::MatchEnd, Field::Target, Field::Keyword];

    /// Wire value
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Lower-case field name (`match`, `matchend`, `target`, `keyword`)
    pub fn name(self) -> &'static str {
        match self {
            Field::Target => "target",
            Field::Keyword => "keyword",
            Field::Match => "match",
            Field::MatchEnd => "matchend",
        }
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "target" => Ok(Field::Target),
            "keyword" => Ok(Field::Keyword),
            "match" => Ok(Field::Match),
            "matchend" => Ok(Field::MatchEnd),
            other => Err(format!("unknown field: {}", other)),
        }
    }
}

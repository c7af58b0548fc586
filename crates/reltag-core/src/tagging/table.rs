//! Static tag tables, one entry per category in traversal order.
//!
//! Every inner slice is a priority group: at most one of its rules emits a
//! tag. Independent checks are simply groups of one.

use crate::rules::KeywordRule;
use crate::types::TagCategory;

/// A tag rule: keys to look for and the label to emit.
pub type TagRule = KeywordRule<&'static str>;

/// The rule groups of one category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryTable {
    pub category: TagCategory,
    pub groups: &'static [&'static [TagRule]],
}

const fn rule(keys: &'static [&'static str], label: &'static str) -> TagRule {
    KeywordRule::new(keys, label)
}

const RESOLUTION: &[&[TagRule]] = &[&[
    rule(&["2160P"], "4K"),
    rule(&["1440P"], "1440p"),
    rule(&["1080P"], "1080p"),
    rule(&["720P"], "720p"),
    rule(&["576P"], "576p"),
    rule(&["480P"], "480p"),
]];

const HDR: &[&[TagRule]] = &[
    &[rule(&["DOLBYVISION", "DV."], "Dolby Vision")],
    &[
        rule(&["HDR10+"], "HDR10+"),
        rule(&["HDR10"], "HDR10"),
        rule(&["HDR"], "HDR"),
    ],
    &[rule(&["HLG"], "HLG")],
];

const CODEC: &[&[TagRule]] = &[
    &[
        rule(&["H265", "X265", "HEVC"], "H265"),
        rule(&["H264", "X264", "AVC"], "H264"),
    ],
    &[rule(&["AV1"], "AV1")],
    &[rule(&["XVID"], "XviD")],
];

const AUDIO: &[&[TagRule]] = &[
    &[rule(&["ATMOS"], "Atmos")],
    &[
        rule(&["DTS-X"], "DTS-X"),
        rule(&["DTS-HD"], "DTS-HD"),
        rule(&["DTS"], "DTS"),
    ],
    &[rule(&["TRUEHD"], "TrueHD")],
    &[rule(&["DD+", "EAC3"], "DD+"), rule(&["DD", "AC3"], "DD")],
    &[rule(&["AAC"], "AAC")],
    &[rule(&["FLAC"], "FLAC")],
    &[rule(&["7.1"], "7.1"), rule(&["5.1"], "5.1")],
];

const LANGUAGE: &[&[TagRule]] = &[
    &[rule(&[".DL.", ".DUAL."], "Dual Language")],
    &[rule(&[".ML."], "Multi Language")],
    &[rule(&["GERMAN", ".GER.", ".DE."], "GER")],
    &[rule(&["ENGLISH", ".ENG."], "ENG")],
    &[rule(&[".SUBBED", ".SUB."], "SUBBED")],
];

const SOURCE: &[&[TagRule]] = &[
    &[
        rule(&["BLURAY", "BDRIP"], "BluRay"),
        rule(&["WEB-DL", "WEBDL"], "WEB-DL"),
        rule(&["WEBRIP"], "WEBRip"),
        rule(&[".WEB."], "WEB"),
    ],
    &[rule(&["HDTV"], "HDTV")],
    &[rule(&["DVDRIP"], "DVDRip")],
    &[rule(&["REMUX"], "REMUX")],
    &[rule(&[".CAM."], "CAM")],
    &[rule(&[".MD."], "MD")],
];

const PROVIDER: &[&[TagRule]] = &[
    &[rule(&[".NF.", "NETFLIX"], "Netflix")],
    &[rule(&[".AMZN.", "AMAZON"], "Amazon")],
    &[rule(&[".DSNP.", "DISNEY"], "Disney+")],
    &[rule(&[".ATVP.", "APPLETV"], "Apple TV+")],
    &[rule(&[".HMAX."], "HBO Max")],
    &[rule(&[".HULU."], "Hulu")],
];

const MISC: &[&[TagRule]] = &[
    &[rule(&["REPACK"], "REPACK")],
    &[rule(&["PROPER"], "PROPER")],
    &[rule(&["EXTENDED"], "EXTENDED")],
    &[rule(&["UNCUT"], "UNCUT")],
    &[rule(&["COMPLETE"], "COMPLETE")],
    &[rule(&["LIMITED"], "LIMITED")],
    &[rule(&["INTERNAL"], "INTERNAL")],
];

/// The full tag table in category traversal order.
pub const TAG_TABLE: [CategoryTable; 8] = [
    CategoryTable { category: TagCategory::Resolution, groups: RESOLUTION },
    CategoryTable { category: TagCategory::Hdr, groups: HDR },
    CategoryTable { category: TagCategory::Codec, groups: CODEC },
    CategoryTable { category: TagCategory::Audio, groups: AUDIO },
    CategoryTable { category: TagCategory::Language, groups: LANGUAGE },
    CategoryTable { category: TagCategory::Source, groups: SOURCE },
    CategoryTable { category: TagCategory::Provider, groups: PROVIDER },
    CategoryTable { category: TagCategory::Misc, groups: MISC },
];

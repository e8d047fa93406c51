//! Fixed synonym groups for department and subject names.
//!
//! Each group is a set of interchangeable tokens. When the extractor
//! matches any member, the condition value becomes the *entire* group so
//! downstream search matches every member. The groups are policy data,
//! not derived.

/// Interchangeable department/subject name groups.
pub const SYNONYM_GROUPS: &[&[&str]] = &[
    &["국문학", "한국어문학", "한국문학", "국어국문학"],
    &["국문", "한국어문", "한국문", "국어국문"],
    &["영문학", "영어영문학", "영어문학"],
    &["영문", "영어영문", "영어"],
    &["중문학", "중국학", "중국어문"],
    &["중문", "중국", "중국어"],
    &["심리학", "심리"],
    &["경영학", "경영", "기업경영"],
    &["컴퓨터", "소프트웨어", "SW", "IT", "인공지능", "AI"],
    &["수학", "응용수학", "통계"],
    &["물리", "물리학", "응용물리"],
    &["화학", "응용화학", "생화학"],
    &["역사", "한국역사", "세계사"],
    &["미술", "회화", "조형", "디자인"],
    &["음악", "성악", "피아노", "관현악"],
    &["체육", "스포츠", "운동"],
];

/// Subject keywords checked in order — first substring hit wins.
pub const SUBJECT_KEYWORDS: &[&str] = &[
    "심리학", "심리", "수학", "영어", "물리학", "화학", "생물학",
    "역사", "철학", "경제학", "경영학", "컴퓨터", "프로그래밍",
    "데이터", "인공지능", "AI", "머신러닝", "통계", "국문학", "국문",
    "영문학", "영문", "중문학", "중문",
];

/// Generic tokens that look like department names but are not.
pub const DEPT_STOPLIST: &[&str] = &["과목", "학과", "전공", "강의"];

/// Enrollment categories, most specific first. Order matters: the
/// compound names must be checked before the bare 교양/전공 fall-throughs.
pub const ENROLLMENT_TYPES: &[(&str, &str)] = &[
    ("전공필수", "major_required"),
    ("전공선택", "major_elective"),
    ("교양필수", "general_required"),
    ("교양선택", "general_elective"),
    ("교양", "general"),
    ("전공", "major"),
];

/// The synonym group containing `token`, if any.
pub fn group_for(token: &str) -> Option<Vec<String>> {
    SYNONYM_GROUPS
        .iter()
        .find(|group| group.contains(&token))
        .map(|group| group.iter().map(|s| s.to_string()).collect())
}

/// Expand a token to its whole synonym group, or to itself.
pub fn expand(token: &str) -> Vec<String> {
    group_for(token).unwrap_or_else(|| vec![token.to_string()])
}

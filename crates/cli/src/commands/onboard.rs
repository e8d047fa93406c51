use advisor_config::AppConfig;

const SAMPLE_STUDENTS: &str = r#"[
  {
    "student_id": "2021001",
    "name": "김민준",
    "major_code": "컴퓨터공학과",
    "admission_year": 2021,
    "completed_semester": 6
  },
  {
    "student_id": "2022015",
    "name": "이서연",
    "major_code": "국어국문학과",
    "admission_year": 2022,
    "completed_semester": 4
  }
]"#;

const SAMPLE_COURSES: &str = r#"[
  {
    "course_code": "CS301-01",
    "course_name": "운영체제",
    "credits": 3,
    "course_type": "major_required",
    "department_code": "컴퓨터공학과",
    "professor": "박지훈",
    "target_grade": "3",
    "offered_year": 2026,
    "offered_semester": 1,
    "prerequisites": ["CS201-01"]
  },
  {
    "course_code": "CS302-01",
    "course_name": "데이터베이스",
    "credits": 3,
    "course_type": "major_elective",
    "department_code": "컴퓨터공학과",
    "professor": "최은정",
    "target_grade": "2-4",
    "offered_year": 2026,
    "offered_semester": 1
  },
  {
    "course_code": "GE101-02",
    "course_name": "글쓰기의 기초",
    "credits": 2,
    "course_type": "general_required",
    "department_code": "교양학부",
    "target_grade": "전체",
    "offered_year": 2026,
    "offered_semester": 1
  },
  {
    "course_code": "GE205-01",
    "course_name": "현대사회와 윤리",
    "credits": 3,
    "course_type": "general_elective",
    "department_code": "교양학부",
    "professor": "한상우",
    "target_grade": "전체",
    "offered_year": 2026,
    "offered_semester": 1
  }
]"#;

const SAMPLE_ENROLLMENTS: &str = r#"[
  {
    "student_id": "2021001",
    "course_code": "CS201-01",
    "enrollment_type": "major_required",
    "earned_credits": 3,
    "offering_department": "컴퓨터공학과",
    "enrollment_semester": "2023-2",
    "grade": "A"
  },
  {
    "student_id": "2021001",
    "course_code": "CS202-01",
    "enrollment_type": "major_elective",
    "earned_credits": 3,
    "offering_department": "컴퓨터공학과",
    "enrollment_semester": "2024-1",
    "grade": "B+"
  },
  {
    "student_id": "2021001",
    "course_code": "GE102-01",
    "enrollment_type": "general_elective",
    "earned_credits": 2,
    "offering_department": "교양학부",
    "enrollment_semester": "2024-1",
    "grade": "A+"
  }
]"#;

const SAMPLE_REQUIREMENTS: &str = r#"[
  {
    "content": "졸업 요건: 총 130학점 이상 이수. 전공 60학점, 교양 30학점을 포함해야 합니다.",
    "metadata": { "source_file": "졸업요건.md" }
  },
  {
    "content": "전공 필수 과목을 모두 이수해야 졸업 사정을 통과할 수 있습니다.",
    "metadata": { "source_file": "졸업요건.md" }
  },
  {
    "content": "교양 영역은 필수 교양과 선택 교양으로 나뉘며 각 영역의 최소 학점을 충족해야 합니다.",
    "metadata": { "source_file": "교양안내.md" }
  }
]"#;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    tokio::fs::create_dir_all(&config_dir).await?;
    println!("✅ Config directory: {}", config_dir.display());

    let config_path = config_dir.join("config.toml");
    if config_path.exists() {
        println!("⚠️  Config already exists: {}", config_path.display());
    } else {
        tokio::fs::write(&config_path, AppConfig::default_toml()).await?;
        println!("✅ Wrote default config: {}", config_path.display());
    }

    let config = AppConfig::load()?;
    tokio::fs::create_dir_all(&config.data_dir).await?;
    tokio::fs::create_dir_all(&config.memory.dir).await?;

    let fixtures = [
        ("students.json", SAMPLE_STUDENTS),
        ("courses.json", SAMPLE_COURSES),
        ("enrollments.json", SAMPLE_ENROLLMENTS),
        ("requirements.json", SAMPLE_REQUIREMENTS),
    ];
    for (name, body) in fixtures {
        let path = config.data_dir.join(name);
        if path.exists() {
            println!("⚠️  Keeping existing data file: {}", path.display());
        } else {
            tokio::fs::write(&path, body).await?;
            println!("✅ Wrote sample data: {}", path.display());
        }
    }

    println!();
    println!("다음 명령으로 바로 질문할 수 있습니다:");
    println!("  advisor ask --student 2021001 \"다음 학기에 뭘 들어야 할까?\"");
    Ok(())
}

use advisor_core::SemesterCalendar;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = SemesterCalendar::today();
    println!("{}", snapshot.context_line());
    match snapshot.current {
        Some(current) => println!("진행 중인 학기: {current}"),
        None => println!("현재는 방학 기간입니다."),
    }
    println!("다음 학기: {}", snapshot.next);
    println!("지난 학기: {}", snapshot.prev);
    Ok(())
}

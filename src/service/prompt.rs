use chrono::{DateTime, Local, NaiveDateTime, Utc};
use chrono_tz::Tz;

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock time of `now` in `timezone_id`. Unknown zones fall back to the
/// server's local clock.
pub fn current_time_in(timezone_id: &str, now: DateTime<Utc>) -> NaiveDateTime {
    match timezone_id.parse::<Tz>() {
        Ok(tz) => now.with_timezone(&tz).naive_local(),
        Err(_) => now.with_timezone(&Local).naive_local(),
    }
}

pub fn build_prompt(raw_text: &str, current_time: NaiveDateTime, timezone_id: &str) -> String {
    format!(
        "You are acting as a **flexible daily planner** for someone with an **irregular sleep schedule**. \
         Your job is to create a complete and structured schedule for the day based on:\n\
         \n\
         1. **Wake-up time** (user provides; often from the previous night)\n\
         2. **Current time** (real-time in {zone} unless otherwise stated)\n\
         3. **A list of tasks with estimated durations** (provided by the user, in hours or minutes)\n\
         \n\
         ---\n\
         \n\
         ### Your responsibilities:\n\
         \n\
         - **Start the schedule at the wake-up time**\n\
         - **Fit all tasks into the current day**, without pushing any to the next day\n\
         - **Reorder tasks** for efficiency, if logical\n\
         - **Insert buffer breaks** (5-15 mins) after long or consecutive tasks\n\
         - **End with a suggested bedtime**, based on ~16-18 hours of total wakefulness\n\
         - Output two things:\n\
         \x20 1. **Readable written schedule** with:\n\
         \x20    - Start/end times\n\
         \x20    - Task names or short labels\n\
         \x20    - Breaks labeled clearly\n\
         \x20 2. **Raw `.ics` file content** with correct formatting:\n\
         \x20    - Use `BEGIN:VEVENT`, `DTSTART;TZID={zone}:YYYYMMDDTHHMMSS`, `DTEND;TZID={zone}:YYYYMMDDTHHMMSS`, and `SUMMARY:Task name`\n\
         \x20    - Wrap all events in `BEGIN:VCALENDAR` and `END:VCALENDAR`\n\
         \x20    - Use 24-hour time and assume all times are in {zone}\n\
         \n\
         ---\n\
         \n\
         ### Example Input:\n\
         - Wake-up time: 2025-05-05 20:00\n\
         - Current time: 2025-05-05 19:30\n\
         - Tasks:\n\
         \x20 - Research (1 hour)\n\
         \x20 - Watch recording (5 hours)\n\
         \n\
         ### Example Written Output:\n\
         ```\n\
         08:00 PM - 09:00 PM: Research\n\
         09:00 PM - 09:15 PM: Short Break\n\
         09:15 PM - 02:15 AM: Watch recording\n\
         02:15 AM - 02:30 AM: Short Break\n\
         02:30 AM - 04:30 AM: Leisure or unwind\n\
         Suggested bedtime: 12:00 PM\n\
         ```\n\
         \n\
         ### Example `.ics` Output:\n\
         ```\n\
         BEGIN:VCALENDAR\n\
         VERSION:2.0\n\
         BEGIN:VEVENT\n\
         DTSTART;TZID={zone}:20250505T200000\n\
         DTEND;TZID={zone}:20250505T210000\n\
         SUMMARY:Research\n\
         END:VEVENT\n\
         BEGIN:VEVENT\n\
         DTSTART;TZID={zone}:20250505T211500\n\
         DTEND;TZID={zone}:20250506T021500\n\
         SUMMARY:Watch recording\n\
         END:VEVENT\n\
         END:VCALENDAR\n\
         ```\n\
         \n\
         ---\n\
         \n\
         User Input: \"{user_input}\"\n\
         Current Time: \"{now}\"\n\
         Time Zone: \"{zone}\"\n\
         You MUST be aware of the current time. Only schedule events that start at or after the current time.\n",
        zone = timezone_id,
        user_input = raw_text,
        now = current_time.format(TIME_FORMAT),
    )
}

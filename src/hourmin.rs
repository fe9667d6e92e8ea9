use std::fmt;

/// Time of day as sent by the API (`14:30:00`) or by a time input (`14:30`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HourMin {
    hour: u8,
    min: u8,
}

impl fmt::Display for HourMin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.min)
    }
}

impl TryFrom<&str> for HourMin {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut parts = value.trim().split(':');
        let hour = parts
            .next()
            .filter(|h| (1..=2).contains(&h.len()))
            .ok_or_else(|| format!("Missing hour: {}", value))?
            .parse::<u8>()
            .map_err(|e| format!("Invalid hour: {}", e))?;
        if hour > 23 {
            return Err(format!("Invalid hour, value too high: {}", hour));
        }

        let min = parts
            .next()
            .filter(|m| m.len() == 2)
            .ok_or_else(|| format!("Missing min: {}", value))?
            .parse::<u8>()
            .map_err(|e| format!("Invalid min: {}", e))?;
        if min > 59 {
            return Err(format!("Invalid min, value too high: {}", min));
        }

        // seconds are accepted but dropped
        if let Some(sec) = parts.next() {
            let sec = sec
                .parse::<u8>()
                .map_err(|e| format!("Invalid sec: {}", e))?;
            if sec > 59 {
                return Err(format!("Invalid sec, value too high: {}", sec));
            }
        }
        if parts.next().is_some() {
            return Err(format!("Trailing data in time: {}", value));
        }
        Ok(Self { hour, min })
    }
}

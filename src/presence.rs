use std::collections::HashSet;

use tokio::sync::Mutex;

/// Users currently online, fed from gateway presence updates
#[derive(Debug, Default)]
pub struct Presence {
    online: Mutex<HashSet<u64>>,
}

impl Presence {
    pub async fn update(&self, user_id: u64, online: bool) {
        let mut users = self.online.lock().await;
        if online {
            users.insert(user_id);
        } else {
            users.remove(&user_id);
        }
    }

    pub async fn count(&self) -> usize {
        self.online.lock().await.len()
    }
}

pub fn online_label(count: usize) -> String {
    match count {
        1 => "1 developer online".to_owned(),
        n => format!("{n} developers online"),
    }
}

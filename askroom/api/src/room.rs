use crate::Error;
use askroom_model::prelude::*;
use std::collections::{BTreeMap, HashMap};

/// Questions shorter than this (in bytes) are rejected.
pub const MIN_QUESTION_LEN: usize = 5;

struct User {
    room: RoomName,
    owner: bool,
    votes: HashMap<u64, Vote>,
}

impl User {
    fn new(room: RoomName, owner: bool) -> Self {
        Self {
            room,
            owner,
            votes: HashMap::new(),
        }
    }
}

#[derive(Default)]
struct Room {
    questions: BTreeMap<u64, Question>,
    closed: bool,
}

/// All rooms and users of the process.
#[derive(Default)]
pub struct Rooms {
    rooms: HashMap<RoomName, Room>,
    users: HashMap<String, User>,
    last_question: u64,
}

impl Rooms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room, returning its name and the id of its owner.
    pub fn create_room(&mut self, name: &str) -> Result<(RoomName, String), Error> {
        let name = RoomName::parse(name)?;
        if self.rooms.contains_key(&name) {
            return Err(Error::RoomExists);
        }

        self.rooms.insert(name.clone(), Room::default());
        let owner = self.add_user(name.clone(), true);

        log::info!("Created room {name}");
        Ok((name, owner))
    }

    pub fn list_rooms(&self) -> Vec<RoomName> {
        let mut rooms: Vec<_> = self.rooms.keys().cloned().collect();
        rooms.sort();
        rooms
    }

    pub fn close_room(&mut self, name: &str, user: &str) -> Result<(), Error> {
        let name = RoomName::lookup(name);
        if !self.rooms.contains_key(&name) {
            return Err(Error::RoomNotFound);
        }

        match self.users.get(user) {
            Some(user) if user.room == name => {
                if !user.owner {
                    return Err(Error::NotOwner);
                }
            }
            _ => return Err(Error::NotAuthorized),
        }

        if let Some(room) = self.rooms.get_mut(&name) {
            room.closed = true;
        }
        log::info!("Closed room {name}");
        Ok(())
    }

    /// Register a user with a room.
    ///
    /// A user already registered with the room keeps its id, everyone else gets a new one.
    pub fn register(&mut self, name: &str, user: Option<&str>) -> Result<String, Error> {
        let name = RoomName::lookup(name);
        if !self.rooms.contains_key(&name) {
            return Err(Error::RoomNotFound);
        }

        let id = match user {
            Some(id) if self.users.get(id).is_some_and(|user| user.room == name) => id.to_string(),
            _ => self.add_user(name.clone(), false),
        };

        log::info!("Registered user {id} with room {name}");
        Ok(id)
    }

    pub fn publish_question(&mut self, name: &str, user: &str, text: &str) -> Result<u64, Error> {
        let name = RoomName::lookup(name);
        let room = self.rooms.get_mut(&name).ok_or(Error::RoomNotFound)?;
        if !self.users.get(user).is_some_and(|user| user.room == name) {
            return Err(Error::NotRegistered);
        }

        if room.closed {
            return Err(Error::RoomClosed);
        }
        if text.len() < MIN_QUESTION_LEN {
            return Err(Error::QuestionTooShort);
        }

        self.last_question += 1;
        let id = self.last_question;
        room.questions.insert(
            id,
            Question {
                id,
                q: text.to_string(),
                vote: 0,
            },
        );

        log::info!("Added question {id} to room {name}");
        Ok(id)
    }

    pub fn questions(&self, name: &str) -> Result<QuestionList, Error> {
        let room = self.rooms.get(&RoomName::lookup(name)).ok_or(Error::RoomNotFound)?;
        Ok(QuestionList {
            questions: room.questions.values().cloned().collect(),
            is_closed: room.closed,
        })
    }

    /// Record the vote of a user, replacing a previous one. Returns the new count.
    ///
    /// The question id and the value are taken as sent, they get validated after the user.
    pub fn vote(&mut self, name: &str, user: &str, question: &str, value: &str) -> Result<i64, Error> {
        let name = RoomName::lookup(name);
        let room = self.rooms.get_mut(&name).ok_or(Error::RoomNotFound)?;
        let user = match self.users.get_mut(user) {
            Some(user) if user.room == name => user,
            _ => return Err(Error::NotRegistered),
        };

        let id: u64 = question.parse().map_err(|_| Error::InvalidQuestionId)?;
        let question = room.questions.get_mut(&id).ok_or(Error::QuestionNotFound)?;
        let vote = value
            .parse::<i64>()
            .map_err(|_| Error::InvalidVote)
            .and_then(|value| Vote::try_from(value).map_err(Error::from))?;

        let previous = user.votes.insert(id, vote).unwrap_or_default();
        question.vote += vote.value() - previous.value();

        log::info!("Voted question {name}/{id} by {}", vote.value());
        Ok(question.vote)
    }

    fn add_user(&mut self, room: RoomName, owner: bool) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.users.insert(id.clone(), User::new(room, owner));
        id
    }
}

// src/services/music_service.rs
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Music, Song};
use crate::error::{AppError, AppResult};
use crate::forms::{MusicForm, SongForm};
use crate::repositories::{MusicRepository, SongRepository};
use crate::services::cache::ListCache;
use crate::services::{compact_positions, neighbor_swap, next_position};

/// Albums with their songs. Only the root album list is cached, song
/// reads go to the repository.
pub struct MusicService {
    music: Arc<dyn MusicRepository>,
    songs: Arc<dyn SongRepository>,
    cache: ListCache<Music>,
}

impl MusicService {
    pub fn new(
        music: Arc<dyn MusicRepository>,
        songs: Arc<dyn SongRepository>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            music,
            songs,
            cache: ListCache::new(cache_capacity),
        }
    }

    // ========================================================================
    // ALBUMS
    // ========================================================================

    pub fn list(&self, user: Uuid) -> AppResult<Vec<Music>> {
        self.cache
            .get_or_load(user, || self.music.find_all_by_user(user))
    }

    pub fn get(&self, id: i64, user: Uuid) -> AppResult<Music> {
        self.music
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add(&self, form: &MusicForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }

        let mut music = form.to_record()?;
        music.position = next_position(&self.music.find_all_by_user(user)?);

        let id = self.music.add(&music, user)?;
        self.cache.invalidate(user);
        log::info!("Added music {id}");
        Ok(id)
    }

    pub fn update(&self, form: &MusicForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        self.get(id, user)?;

        let music = form.to_record()?;
        self.music.update(&music, user)?;
        self.cache.invalidate(user);
        Ok(())
    }

    pub fn remove(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.get(id, user)?;
        self.music.delete(id)?;

        let remaining = self.music.find_all_by_user(user)?;
        compact_positions(&remaining, |id, position| {
            self.music.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        log::info!("Removed music {id}");
        Ok(())
    }

    /// Copies the album together with its songs.
    pub fn duplicate(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let music = self.get(id, user)?;

        let mut copy = music.duplicated();
        copy.position = next_position(&self.music.find_all_by_user(user)?);
        let new_id = self.music.add(&copy, user)?;

        for song in self.songs.find_all_by_music_and_user(id, user)? {
            let mut song_copy = song.duplicated();
            song_copy.music_id = new_id;
            self.songs.add(&song_copy, user)?;
        }

        self.cache.invalidate(user);
        Ok(new_id)
    }

    pub fn move_up(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_music(id, -1, user)
    }

    pub fn move_down(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_music(id, 1, user)
    }

    pub fn update_positions(&self, user: Uuid) -> AppResult<()> {
        let music = self.music.find_all_by_user(user)?;
        compact_positions(&music, |id, position| {
            self.music.update_position(id, position, user)
        })?;
        self.cache.invalidate(user);
        Ok(())
    }

    // ========================================================================
    // SONGS
    // ========================================================================

    pub fn list_songs(&self, music_id: i64, user: Uuid) -> AppResult<Vec<Song>> {
        self.get(music_id, user)?;
        self.songs.find_all_by_music_and_user(music_id, user)
    }

    pub fn get_song(&self, id: i64, user: Uuid) -> AppResult<Song> {
        self.songs
            .find_by_id_and_user(id, user)?
            .ok_or(AppError::NotFound)
    }

    pub fn add_song(&self, music_id: i64, form: &SongForm, user: Uuid) -> AppResult<i64> {
        form.validate()?;
        if form.id.is_some() {
            return Err(AppError::FormContract("id"));
        }
        self.get(music_id, user)?;

        let mut song = form.to_record(music_id)?;
        song.position = next_position(&self.songs.find_all_by_music_and_user(music_id, user)?);

        self.songs.add(&song, user)
    }

    pub fn update_song(&self, form: &SongForm, user: Uuid) -> AppResult<()> {
        form.validate()?;
        let id = form.id.ok_or(AppError::FormContract("id"))?;
        let existing = self.get_song(id, user)?;

        let song = form.to_record(existing.music_id)?;
        self.songs.update(&song, user)
    }

    pub fn remove_song(&self, id: i64, user: Uuid) -> AppResult<()> {
        let song = self.get_song(id, user)?;
        self.songs.delete(id)?;

        let siblings = self.songs.find_all_by_music_and_user(song.music_id, user)?;
        compact_positions(&siblings, |id, position| {
            self.songs.update_position(id, position, user)
        })
    }

    pub fn duplicate_song(&self, id: i64, user: Uuid) -> AppResult<i64> {
        let song = self.get_song(id, user)?;

        let mut copy = song.duplicated();
        copy.position =
            next_position(&self.songs.find_all_by_music_and_user(song.music_id, user)?);

        self.songs.add(&copy, user)
    }

    pub fn move_song_up(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_songs(id, -1, user)
    }

    pub fn move_song_down(&self, id: i64, user: Uuid) -> AppResult<()> {
        self.swap_songs(id, 1, user)
    }

    pub fn update_song_positions(&self, music_id: i64, user: Uuid) -> AppResult<()> {
        let songs = self.songs.find_all_by_music_and_user(music_id, user)?;
        compact_positions(&songs, |id, position| {
            self.songs.update_position(id, position, user)
        })
    }

    // ========================================================================
    // INTERNALS
    // ========================================================================

    fn swap_music(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let music = self.music.find_all_by_user(user)?;
        for (id, position) in neighbor_swap(&music, id, step)? {
            self.music.update_position(id, position, user)?;
        }
        self.cache.invalidate(user);
        Ok(())
    }

    fn swap_songs(&self, id: i64, step: isize, user: Uuid) -> AppResult<()> {
        let song = self.get_song(id, user)?;
        let siblings = self.songs.find_all_by_music_and_user(song.music_id, user)?;
        for (id, position) in neighbor_swap(&siblings, id, step)? {
            self.songs.update_position(id, position, user)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, initialize_database};
    use crate::domain::Time;
    use crate::forms::TimeForm;
    use crate::repositories::{SqliteMusicRepository, SqliteSongRepository};

    fn service() -> MusicService {
        let pool = Arc::new(create_memory_pool().unwrap());
        initialize_database(&pool.get().unwrap()).unwrap();
        MusicService::new(
            Arc::new(SqliteMusicRepository::new(pool.clone())),
            Arc::new(SqliteSongRepository::new(pool.clone())),
            4,
        )
    }

    fn music_form(name: &str) -> MusicForm {
        MusicForm {
            name: name.to_string(),
            media_count: "1".to_string(),
            ..MusicForm::default()
        }
    }

    fn song_form(name: &str) -> SongForm {
        SongForm {
            name: name.to_string(),
            length: TimeForm::from_time(Time::from_parts(0, 4, 40)),
            ..SongForm::default()
        }
    }

    #[test]
    fn test_song_requires_owned_album() {
        let service = service();
        let user = Uuid::new_v4();
        let music_id = service.add(&music_form("The Wall"), user).unwrap();

        let err = service
            .add_song(music_id, &song_form("Hey You"), Uuid::new_v4())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        service.add_song(music_id, &song_form("Hey You"), user).unwrap();
        assert_eq!(service.list_songs(music_id, user).unwrap().len(), 1);
    }

    #[test]
    fn test_songs_take_positions_per_album() {
        let service = service();
        let user = Uuid::new_v4();
        let first_album = service.add(&music_form("The Wall"), user).unwrap();
        let second_album = service.add(&music_form("Animals"), user).unwrap();
        service.add_song(second_album, &song_form("Dogs"), user).unwrap();

        service
            .add_song(first_album, &song_form("In the Flesh?"), user)
            .unwrap();
        service
            .add_song(first_album, &song_form("The Thin Ice"), user)
            .unwrap();

        let songs = service.list_songs(first_album, user).unwrap();
        assert_eq!(songs[0].position, 0);
        assert_eq!(songs[1].position, 1);
    }

    #[test]
    fn test_duplicate_album_copies_songs() {
        let service = service();
        let user = Uuid::new_v4();
        let music_id = service.add(&music_form("The Wall"), user).unwrap();
        service.add_song(music_id, &song_form("Hey You"), user).unwrap();

        let copy_id = service.duplicate(music_id, user).unwrap();

        let copied = service.list_songs(copy_id, user).unwrap();
        assert_eq!(copied.len(), 1);
        assert_eq!(copied[0].name, "Hey You");
        assert_eq!(service.list_songs(music_id, user).unwrap().len(), 1);
    }

    #[test]
    fn test_update_song_keeps_parent_album() {
        let service = service();
        let user = Uuid::new_v4();
        let music_id = service.add(&music_form("The Wall"), user).unwrap();
        let song_id = service
            .add_song(music_id, &song_form("Hey You"), user)
            .unwrap();

        let mut renamed = song_form("Comfortably Numb");
        renamed.id = Some(song_id);
        service.update_song(&renamed, user).unwrap();

        let stored = service.get_song(song_id, user).unwrap();
        assert_eq!(stored.music_id, music_id);
        assert_eq!(stored.name, "Comfortably Numb");
    }

    #[test]
    fn test_song_moves_swap_neighbors() {
        let service = service();
        let user = Uuid::new_v4();
        let music_id = service.add(&music_form("The Wall"), user).unwrap();
        service
            .add_song(music_id, &song_form("In the Flesh?"), user)
            .unwrap();
        let second = service
            .add_song(music_id, &song_form("The Thin Ice"), user)
            .unwrap();

        service.move_song_up(second, user).unwrap();

        let names: Vec<String> = service
            .list_songs(music_id, user)
            .unwrap()
            .into_iter()
            .map(|song| song.name)
            .collect();
        assert_eq!(names, ["The Thin Ice", "In the Flesh?"]);

        assert!(matches!(
            service.move_song_up(second, user),
            Err(AppError::NotMovable)
        ));
    }

    #[test]
    fn test_remove_album_takes_songs_with_it() {
        let service = service();
        let user = Uuid::new_v4();
        let music_id = service.add(&music_form("The Wall"), user).unwrap();
        let song_id = service
            .add_song(music_id, &song_form("Hey You"), user)
            .unwrap();

        service.remove(music_id, user).unwrap();

        assert!(matches!(
            service.get_song(song_id, user),
            Err(AppError::NotFound)
        ));
    }
}

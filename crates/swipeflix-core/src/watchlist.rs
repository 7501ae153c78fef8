use std::collections::HashSet;
use swipeflix_models::{ContentId, ContentItem, Movie, SearchHit, TvShow};
use tracing::{debug, info};

use crate::storage::{load_record, save_record, RecordStorage};

pub const MOVIES_RECORD: &str = "savedMovies";
pub const SHOWS_RECORD: &str = "savedTVShows";

/// Insertion-ordered set keyed by upstream id.
#[derive(Debug)]
struct OrderedSet<T> {
    items: Vec<T>,
    index: HashSet<u64>,
}

impl<T> OrderedSet<T> {
    fn from_items(items: Vec<T>, key: fn(&T) -> u64) -> Self {
        let mut set = Self { items: Vec::with_capacity(items.len()), index: HashSet::new() };
        for item in items {
            set.insert(item, key);
        }
        set
    }

    fn insert(&mut self, item: T, key: fn(&T) -> u64) -> bool {
        if !self.index.insert(key(&item)) {
            return false;
        }
        self.items.push(item);
        true
    }

    fn remove(&mut self, id: u64, key: fn(&T) -> u64) -> bool {
        if !self.index.remove(&id) {
            return false;
        }
        self.items.retain(|item| key(item) != id);
        true
    }

    fn contains(&self, id: u64) -> bool {
        self.index.contains(&id)
    }

    fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}

fn movie_key(movie: &Movie) -> u64 {
    movie.id
}

fn show_key(show: &TvShow) -> u64 {
    show.id
}

/// Saved movies and shows, persisted on every mutation.
///
/// Storage failures never surface: a failed load starts empty and a failed
/// write is logged.
pub struct WatchlistStore {
    movies: OrderedSet<Movie>,
    shows: OrderedSet<TvShow>,
    storage: Box<dyn RecordStorage>,
}

impl WatchlistStore {
    pub fn load(storage: Box<dyn RecordStorage>) -> Self {
        let movies: Vec<Movie> = load_record(storage.as_ref(), MOVIES_RECORD);
        let shows: Vec<TvShow> = load_record(storage.as_ref(), SHOWS_RECORD);
        info!("Loaded watchlist: {} movies, {} shows", movies.len(), shows.len());

        Self {
            movies: OrderedSet::from_items(movies, movie_key),
            shows: OrderedSet::from_items(shows, show_key),
            storage,
        }
    }

    /// Save a movie, show or search hit. Returns whether the watchlist changed.
    ///
    /// News and ad cards are not saveable.
    pub fn add(&mut self, item: &ContentItem) -> bool {
        match item {
            ContentItem::Movie(movie) => self.add_movie(movie.clone()),
            ContentItem::Show(show) => self.add_show(show.clone()),
            ContentItem::Search(result) => match &result.hit {
                SearchHit::Movie(movie) => self.add_movie(movie.clone()),
                SearchHit::Show(show) => self.add_show(show.clone()),
            },
            ContentItem::News(_) | ContentItem::Ad(_) => false,
        }
    }

    pub fn add_movie(&mut self, movie: Movie) -> bool {
        let id = movie.id;
        if !self.movies.insert(movie, movie_key) {
            debug!("Movie {} already on watchlist", id);
            return false;
        }
        self.persist_movies();
        true
    }

    pub fn add_show(&mut self, show: TvShow) -> bool {
        let id = show.id;
        if !self.shows.insert(show, show_key) {
            debug!("Show {} already on watchlist", id);
            return false;
        }
        self.persist_shows();
        true
    }

    pub fn remove(&mut self, item: &ContentItem) -> bool {
        self.remove_id(&item.id())
    }

    /// Remove by identity. The affected set is re-persisted either way.
    pub fn remove_id(&mut self, id: &ContentId) -> bool {
        match id {
            ContentId::Movie(movie_id) => {
                let removed = self.movies.remove(*movie_id, movie_key);
                self.persist_movies();
                removed
            }
            ContentId::Show(show_id) => {
                let removed = self.shows.remove(*show_id, show_key);
                self.persist_shows();
                removed
            }
            ContentId::News { .. } | ContentId::Ad(_) => false,
        }
    }

    pub fn contains(&self, item: &ContentItem) -> bool {
        self.contains_id(&item.id())
    }

    pub fn contains_id(&self, id: &ContentId) -> bool {
        match id {
            ContentId::Movie(movie_id) => self.movies.contains(*movie_id),
            ContentId::Show(show_id) => self.shows.contains(*show_id),
            ContentId::News { .. } | ContentId::Ad(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.movies.clear();
        self.shows.clear();
        self.persist_movies();
        self.persist_shows();
        info!("Watchlist cleared");
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies.items
    }

    pub fn shows(&self) -> &[TvShow] {
        &self.shows.items
    }

    pub fn len(&self) -> usize {
        self.movies.items.len() + self.shows.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every saved entry as a content item, movies first.
    pub fn items(&self) -> Vec<ContentItem> {
        self.movies
            .items
            .iter()
            .cloned()
            .map(ContentItem::Movie)
            .chain(self.shows.items.iter().cloned().map(ContentItem::Show))
            .collect()
    }

    fn persist_movies(&self) {
        save_record(self.storage.as_ref(), MOVIES_RECORD, &self.movies.items);
    }

    fn persist_shows(&self) {
        save_record(self.storage.as_ref(), SHOWS_RECORD, &self.shows.items);
    }
}
